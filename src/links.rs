//! 外部链接（地图、邮件）

use urlencoding::encode;

const MAPS_SEARCH: &str = "https://www.google.com/maps/search/?api=1&query=";

/// 地址的地图搜索链接
pub fn map_link(address: &str) -> String {
    format!("{MAPS_SEARCH}{}", encode(address.trim()))
}

/// 带主题的 mailto 链接
pub fn mail_link(email: &str, subject: Option<&str>) -> String {
    match subject.map(str::trim).filter(|s| !s.is_empty()) {
        Some(subject) => format!("mailto:{email}?subject={}", encode(subject)),
        None => format!("mailto:{email}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_link_encodes_address() {
        assert_eq!(
            map_link(" 3 Afolabi-Brown Street, Akoka "),
            "https://www.google.com/maps/search/?api=1&query=3%20Afolabi-Brown%20Street%2C%20Akoka"
        );
    }

    #[test]
    fn test_mail_link() {
        assert_eq!(mail_link("a@b.org", None), "mailto:a@b.org");
        assert_eq!(mail_link("a@b.org", Some("  ")), "mailto:a@b.org");
        assert_eq!(
            mail_link("a@b.org", Some("Donation Request")),
            "mailto:a@b.org?subject=Donation%20Request"
        );
    }
}
