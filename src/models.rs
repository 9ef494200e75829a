use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::schedule::ServiceWindow;

/// 教区基本信息
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParishInfo {
    pub name: String,
    #[serde(default)]
    pub tagline: String,
    pub address: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// 礼拜
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub window: ServiceWindow,
}

/// 讲道
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sermon {
    pub title: String,
    pub preacher: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub scripture: String,
    #[serde(default)]
    pub summary: String,
}

/// 会众见证
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    pub name: String,
    #[serde(default)]
    pub role: String,
    pub quote: String,
}

/// 博客文章
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub category: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub read_minutes: u32,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub body: String,
}

/// 外部视频链接（只展示，不播放）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaHighlight {
    pub title: String,
    pub url: String,
}

/// 直播平台链接
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamLink {
    pub name: String,
    pub url: String,
}

/// 近期活动。日期和时间按原样展示（例如 "First Thursday"）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub title: String,
    pub date: String,
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub featured: bool,
}

/// 常见问题
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub question: String,
    pub answer: String,
}

/// 诗班音频
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub title: String,
    #[serde(default)]
    pub artist: String,
    pub duration_secs: u64,
}

/// TOML 文件结构
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParishContent {
    pub parish: ParishInfo,
    #[serde(default)]
    pub services: Vec<Service>,
    #[serde(default)]
    pub sermons: Vec<Sermon>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
    #[serde(default)]
    pub posts: Vec<BlogPost>,
    #[serde(default)]
    pub highlights: Vec<MediaHighlight>,
    #[serde(default)]
    pub stream_links: Vec<StreamLink>,
    #[serde(default)]
    pub events: Vec<Event>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
    pub track: Track,
}

impl ParishContent {
    /// 按日期倒序排列博客，最新在前
    pub fn sort_posts(&mut self) {
        self.posts.sort_by(|a, b| b.date.cmp(&a.date));
    }
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn stream(name: &str, url: &str) -> StreamLink {
    StreamLink {
        name: name.to_string(),
        url: url.to_string(),
    }
}

fn event(title: &str, date: &str, time: &str, description: &str, featured: bool) -> Event {
    Event {
        title: title.to_string(),
        date: date.to_string(),
        time: time.to_string(),
        location: "Glade Cathedral".to_string(),
        description: description.to_string(),
        featured,
    }
}

fn faq(question: &str, answer: &str) -> Faq {
    Faq {
        question: question.to_string(),
        answer: answer.to_string(),
    }
}

impl Default for ParishContent {
    fn default() -> Self {
        let mut content = Self {
            parish: ParishInfo {
                name: "CCC Akoka Parish".to_string(),
                tagline: "Glade Cathedral, a house of prayer for all people".to_string(),
                address: "3 Afolabi-Brown Street, Akoka, Lagos, Nigeria".to_string(),
                email: "cccakokaparish@gmail.com".to_string(),
                phone: "+234 803 311 9288".to_string(),
            },
            services: vec![
                Service {
                    title: "Midweek Gathering".to_string(),
                    description: "Prayer, fellowship and biblical teaching to carry you through the week.".to_string(),
                    window: ServiceWindow::weekly(Weekday::Wed, hm(9, 0), hm(10, 0)),
                },
                Service {
                    title: "Divine Worship".to_string(),
                    description: "Hymns, prophetic declarations and the sermon. All are welcome.".to_string(),
                    window: ServiceWindow::weekly(Weekday::Sun, hm(10, 0), hm(14, 0)),
                },
                Service {
                    title: "Monthly Vigil".to_string(),
                    description: "A night of intercession and worship until dawn.".to_string(),
                    window: ServiceWindow::first_of_month(Weekday::Thu, hm(22, 0), hm(4, 0)),
                },
            ],
            sermons: vec![
                Sermon {
                    title: "Walking in Divine Light".to_string(),
                    preacher: "The Shepherd".to_string(),
                    date: ymd(2025, 1, 12),
                    scripture: "John 8:12".to_string(),
                    summary: "Light reveals the path; obedience walks it.".to_string(),
                },
                Sermon {
                    title: "The Power of Fervent Prayer".to_string(),
                    preacher: "Sup. Evang. Ademusire".to_string(),
                    date: ymd(2025, 1, 19),
                    scripture: "James 5:16".to_string(),
                    summary: "Prayer that is persistent and sincere changes circumstances.".to_string(),
                },
                Sermon {
                    title: "A House of Peace".to_string(),
                    preacher: "The Shepherd".to_string(),
                    date: ymd(2025, 1, 26),
                    scripture: "Isaiah 56:7".to_string(),
                    summary: "What it means for the sanctuary to be a refuge for every visitor.".to_string(),
                },
                Sermon {
                    title: "Harvest of Thanksgiving".to_string(),
                    preacher: "Evang. Michael Adeyemi".to_string(),
                    date: ymd(2025, 2, 2),
                    scripture: "Psalm 126:5-6".to_string(),
                    summary: "Sowing in tears, reaping in joy.".to_string(),
                },
            ],
            testimonials: vec![
                Testimonial {
                    name: "Deaconess Adebimpe Oladele".to_string(),
                    role: "Member since 2018".to_string(),
                    quote: "The atmosphere here breathes peace. Every worry fades when I enter this sanctuary.".to_string(),
                },
                Testimonial {
                    name: "Bro. Emmanuel Taiwo".to_string(),
                    role: "Youth Leader".to_string(),
                    quote: "The love and genuine care from the congregation is overwhelming.".to_string(),
                },
                Testimonial {
                    name: "Sis. Folake Adekunle".to_string(),
                    role: "Choir Member".to_string(),
                    quote: "The hospitality, the manners, the respect. It is a true house of God.".to_string(),
                },
                Testimonial {
                    name: "Sis. Grace Oluwaseun".to_string(),
                    role: "Women's Fellowship".to_string(),
                    quote: "From my first visit, I felt at home.".to_string(),
                },
            ],
            posts: vec![
                BlogPost {
                    id: "glade-cathedral-grand-opening".to_string(),
                    title: "Historic Grand Opening: Glade Cathedral Opens Its Sacred Doors".to_string(),
                    author: "CCC Akoka Parish Media Team".to_string(),
                    category: "Church News".to_string(),
                    date: ymd(2025, 1, 5),
                    read_minutes: 5,
                    excerpt: "The parish celebrates the grand opening of the Glade Cathedral.".to_string(),
                    body: "After years of prayer and labour, the doors of the Glade Cathedral opened to the congregation and the wider Akoka community.".to_string(),
                },
                BlogPost {
                    id: "shepherd-welcome-message".to_string(),
                    title: "A Message from the Shepherd: Welcome to Our Spiritual Home".to_string(),
                    author: "The Shepherd, CCC Akoka Parish".to_string(),
                    category: "Pastoral Message".to_string(),
                    date: ymd(2025, 1, 8),
                    read_minutes: 4,
                    excerpt: "A heartfelt welcome to the congregation in the new cathedral.".to_string(),
                    body: "Beloved, this house belongs to every soul seeking God. Come as you are.".to_string(),
                },
                BlogPost {
                    id: "community-impact-vision".to_string(),
                    title: "Beyond Worship: Glade Cathedral's Vision for Community Impact".to_string(),
                    author: "CCC Akoka Parish Social Welfare Committee".to_string(),
                    category: "Community".to_string(),
                    date: ymd(2025, 1, 15),
                    read_minutes: 6,
                    excerpt: "Education, health initiatives and youth development programs.".to_string(),
                    body: "The cathedral will host literacy classes, health outreach days and a youth mentoring programme.".to_string(),
                },
            ],
            highlights: vec![
                MediaHighlight {
                    title: "CCC Hymn 301 - Divine Worship".to_string(),
                    url: "https://www.youtube.com/watch?v=dJYeiEP2Zmo".to_string(),
                },
                MediaHighlight {
                    title: "CCC Hymn 531 - Praise Celebration".to_string(),
                    url: "https://www.youtube.com/watch?v=pwySN4RoXBw".to_string(),
                },
                MediaHighlight {
                    title: "Luli Concert 4 - Live Performance".to_string(),
                    url: "https://youtu.be/eRPkSgvCD9Y".to_string(),
                },
            ],
            stream_links: vec![
                stream("YouTube", "https://youtube.com/@cccakokaparish"),
                stream("Facebook", "https://facebook.com/cccakokaparish"),
                stream("Instagram", "https://instagram.com/cccakokaparish"),
                stream("TikTok", "https://tiktok.com/@cccakokaparish"),
            ],
            events: vec![
                event(
                    "Harvest Thanksgiving",
                    "December 15, 2024",
                    "10:00 AM",
                    "Annual celebration of God's faithfulness and blessings.",
                    true,
                ),
                event(
                    "New Year Crossover",
                    "December 31, 2024",
                    "10:00 PM",
                    "Usher in the new year with prayers and worship.",
                    true,
                ),
                event(
                    "Monthly Prayer Vigil",
                    "First Thursday",
                    "10:00 PM – 4:00 AM",
                    "A night of intensive prayer and breakthrough.",
                    false,
                ),
            ],
            faqs: vec![
                faq(
                    "What time are the Sunday services?",
                    "Our Sunday services are held at 8:00 AM (First Service) and 10:30 AM (Second Service). We also have a special Thanksgiving Service at 6:00 PM on the last Sunday of every month.",
                ),
                faq(
                    "Where is the church located?",
                    "CCC Akoka Glade Assembly is located at Akoka, Yaba, Lagos, Nigeria. The church is easily accessible and we have ample parking space for worshippers.",
                ),
                faq(
                    "What should I wear to church?",
                    "We encourage worshippers to dress modestly and appropriately. White garments (Sutana) are worn during special services and celebrations, but visitors are welcome in any modest attire.",
                ),
                faq(
                    "How can I join the choir or media team?",
                    "We welcome new members to our Choir and Media Team! Please speak with any of the coordinators after service or visit the Choir & Media page to learn more about our ministries.",
                ),
                faq(
                    "Do you have programs for children and youth?",
                    "Yes! We have dedicated Sunday School classes for children and vibrant youth programs. Our children's church runs concurrently with the main service, and youth meetings are held regularly.",
                ),
                faq(
                    "How can I give offerings or tithes?",
                    "You can give your offerings and tithes during our services, or write to the parish from the Contact page to request bank transfer details.",
                ),
                faq(
                    "Can I watch services online?",
                    "Yes! We stream our services live on YouTube. Visit our YouTube channel (The Glade Choir) or follow the Watch links on the Home page during service times to join us virtually.",
                ),
                faq(
                    "How do I contact the church for prayers or counseling?",
                    "You can reach us by email from the Contact page, or speak with any of our ministers after service. We're here to support you.",
                ),
            ],
            track: Track {
                title: "Celestial Worship".to_string(),
                artist: "The Glade Choir".to_string(),
                duration_secs: 214,
            },
        };
        content.sort_posts();
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_posts_newest_first() {
        let content = ParishContent::default();
        let dates: Vec<NaiveDate> = content.posts.iter().map(|p| p.date).collect();
        let mut sorted = dates.clone();
        sorted.sort_by(|a, b| b.cmp(a));
        assert_eq!(dates, sorted);
    }

    #[test]
    fn test_default_content_has_events_faqs_and_streams() {
        let content = ParishContent::default();
        let names: Vec<&str> = content.stream_links.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, ["YouTube", "Facebook", "Instagram", "TikTok"]);
        assert_eq!(content.events.len(), 3);
        assert_eq!(content.events.iter().filter(|e| e.featured).count(), 2);
        assert_eq!(content.faqs.len(), 8);
        assert!(content.faqs.iter().all(|f| !f.question.is_empty() && !f.answer.is_empty()));
    }

    #[test]
    fn test_default_content_survives_toml() {
        let content = ParishContent::default();
        let text = toml::to_string_pretty(&content).unwrap();
        let back: ParishContent = toml::from_str(&text).unwrap();
        assert_eq!(back.events, content.events);
        assert_eq!(back.faqs, content.faqs);
        assert_eq!(back.stream_links, content.stream_links);
    }

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let text = r#"
            [parish]
            name = "Test Parish"
            address = "1 Road"
            email = "a@b.c"

            [track]
            title = "Hymn"
            duration_secs = 60
        "#;
        let content: ParishContent = toml::from_str(text).unwrap();
        assert_eq!(content.parish.name, "Test Parish");
        assert!(content.sermons.is_empty());
        assert!(content.services.is_empty());
        assert!(content.events.is_empty());
        assert!(content.faqs.is_empty());
        assert!(content.stream_links.is_empty());
        assert_eq!(content.track.artist, "");
    }
}
