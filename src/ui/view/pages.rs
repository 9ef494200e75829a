//! 各页面视图

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
};

use super::carousel::render_carousel;
use super::components::{card, render_dialog_framework};
use super::layouts::centered_rect;
use crate::links::{mail_link, map_link};
use crate::player::format_time;
use crate::schedule::{live_service, next_service};
use crate::ui::state::{App, CarouselHits};

fn label(text: &str) -> Span<'static> {
    Span::styled(text.to_string(), Style::default().fg(Color::DarkGray))
}

fn empty_notice(frame: &mut Frame, area: Rect, title: &str, text: &str) {
    let notice = Paragraph::new(text.to_string())
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));
    frame.render_widget(notice, area);
}

// ============ 直播横幅 ============

const DISMISS_LABEL: &str = " [x] dismiss ";

/// 顶部直播横幅，返回关闭按钮区域
pub fn render_live_banner(frame: &mut Frame, app: &App, area: Rect) -> Option<Rect> {
    if !app.show_live_banner() || area.height == 0 {
        return None;
    }
    let title = live_service(&app.content.services, app.clock.now())
        .map(|service| service.title.clone())
        .unwrap_or_default();
    let watch = app
        .content
        .stream_links
        .first()
        .map(|link| format!("  Watch on {}", link.name))
        .unwrap_or_default();

    let style = Style::default().fg(Color::Black).bg(Color::Green);
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" ● LIVE NOW ", style.add_modifier(Modifier::BOLD)),
            Span::styled(format!("{title}{watch}"), style),
        ]))
        .style(style),
        area,
    );

    let width = u16::try_from(DISMISS_LABEL.chars().count()).unwrap_or(u16::MAX);
    if area.width <= width {
        return None;
    }
    let close = Rect::new(area.right() - width, area.y, width, 1);
    frame.render_widget(
        Paragraph::new(DISMISS_LABEL).style(style.add_modifier(Modifier::REVERSED)),
        close,
    );
    Some(close)
}

// ============ 首页 ============

pub fn render_home(frame: &mut Frame, app: &App, area: Rect) {
    let links = u16::try_from(app.content.stream_links.len()).unwrap_or(u16::MAX);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),                          // 标题
            Constraint::Length(3u16.saturating_add(links)), // 直播与观看链接
            Constraint::Min(3),                             // 礼拜时间
        ])
        .split(area);

    let parish = &app.content.parish;
    let hero = Paragraph::new(vec![
        Line::from(Span::styled(
            parish.name.clone(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(parish.tagline.clone()),
    ])
    .centered()
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(hero, chunks[0]);

    let now = app.clock.now();
    let services = &app.content.services;
    let banner = match live_service(services, now) {
        Some(service) => Line::from(vec![
            Span::styled(
                "● LIVE NOW ",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(service.title.clone()),
        ]),
        None => match next_service(services, now) {
            Some((service, start)) => Line::from(vec![
                label("Next service: "),
                Span::raw(format!("{} ", service.title)),
                Span::styled(
                    start.format("%A %-d %B, %H:%M").to_string(),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
            None => Line::from(label("No services scheduled")),
        },
    };
    let mut live_lines = vec![banner];
    if !app.content.stream_links.is_empty() {
        live_lines.push(Line::default());
    }
    for link in &app.content.stream_links {
        live_lines.push(Line::from(vec![
            label(&format!("{:<10}", link.name)),
            Span::styled(link.url.clone(), Style::default().fg(Color::Cyan)),
        ]));
    }
    frame.render_widget(
        Paragraph::new(live_lines).block(Block::default().title("Live").borders(Borders::ALL)),
        chunks[1],
    );

    let mut lines = Vec::new();
    for service in services {
        lines.push(Line::from(vec![
            Span::styled(
                service.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(service.window.describe(), Style::default().fg(Color::Cyan)),
        ]));
        if !service.description.is_empty() {
            lines.push(Line::from(label(&service.description)));
        }
        lines.push(Line::default());
    }
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(Block::default().title("Service Times").borders(Borders::ALL)),
        chunks[2],
    );
}

// ============ 轮播页面 ============

pub fn render_sermons(frame: &mut Frame, app: &mut App, area: Rect) -> Option<CarouselHits> {
    if app.content.sermons.is_empty() {
        empty_notice(frame, area, "Sermons", "No sermons published yet.");
        return None;
    }
    let sermons = &app.content.sermons;
    let hits = render_carousel(frame, area, &mut app.sermons, |i| {
        let Some(sermon) = sermons.get(i) else {
            return card(String::new(), Vec::new());
        };
        card(
            sermon.title.clone(),
            vec![
                Line::from(vec![label("Preacher  "), Span::raw(sermon.preacher.clone())]),
                Line::from(vec![
                    label("Date      "),
                    Span::raw(sermon.date.format("%-d %B %Y").to_string()),
                ]),
                Line::from(vec![label("Scripture "), Span::raw(sermon.scripture.clone())]),
                Line::default(),
                Line::from(sermon.summary.clone()),
            ],
        )
    });
    Some(hits)
}

pub fn render_testimonials(
    frame: &mut Frame,
    app: &mut App,
    area: Rect,
) -> Option<CarouselHits> {
    if app.content.testimonials.is_empty() {
        empty_notice(frame, area, "Testimonies", "No testimonies yet.");
        return None;
    }
    let testimonials = &app.content.testimonials;
    let hits = render_carousel(frame, area, &mut app.testimonials, |i| {
        let Some(t) = testimonials.get(i) else {
            return card(String::new(), Vec::new());
        };
        card(
            t.name.clone(),
            vec![
                Line::from(Span::styled(
                    format!("“{}”", t.quote),
                    Style::default().add_modifier(Modifier::ITALIC),
                )),
                Line::default(),
                Line::from(label(&t.role)),
            ],
        )
    });
    Some(hits)
}

// ============ 活动与常见问题 ============

pub fn render_events(frame: &mut Frame, app: &App, area: Rect) {
    let events = &app.content.events;
    let events_height = u16::try_from(events.len() * 2 + 2).unwrap_or(u16::MAX).max(3);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(events_height),
            Constraint::Min(3),
            Constraint::Length(5),
        ])
        .split(area);

    if events.is_empty() {
        empty_notice(frame, chunks[0], "Upcoming Events", "No upcoming events.");
    } else {
        let mut lines = Vec::with_capacity(events.len() * 2);
        for event in events {
            let marker = if event.featured { "★ " } else { "  " };
            lines.push(Line::from(vec![
                Span::styled(marker, Style::default().fg(Color::Yellow)),
                Span::styled(
                    event.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  {} · {}", event.date, event.time),
                    Style::default().fg(Color::Cyan),
                ),
                label(&format!("  {}", event.location)),
            ]));
            lines.push(Line::from(vec![Span::raw("  "), label(&event.description)]));
        }
        frame.render_widget(
            Paragraph::new(lines)
                .block(Block::default().title("Upcoming Events").borders(Borders::ALL)),
            chunks[0],
        );
    }

    let faqs = &app.content.faqs;
    if faqs.is_empty() {
        empty_notice(frame, chunks[1], "FAQ", "No questions yet.");
        return;
    }

    let items: Vec<ListItem> = faqs
        .iter()
        .enumerate()
        .map(|(i, faq)| {
            let marker = if app.faq_open == Some(i) { "▾ " } else { "▸ " };
            ListItem::new(Line::from(format!("{marker}{}", faq.question)))
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .title("Frequently Asked Questions")
                .borders(Borders::ALL),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::REVERSED),
        );
    let mut state = ListState::default();
    state.select(Some(app.faq_selected.min(faqs.len() - 1)));
    frame.render_stateful_widget(list, chunks[1], &mut state);

    let answer = match app.faq_open.and_then(|i| faqs.get(i)) {
        Some(faq) => Paragraph::new(faq.answer.clone()).wrap(Wrap { trim: true }),
        None => Paragraph::new(Line::from(label("Press Enter to read the answer."))),
    };
    frame.render_widget(
        answer.block(Block::default().title("Answer").borders(Borders::ALL)),
        chunks[2],
    );
}

// ============ 博客 ============

pub fn render_blog(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = app
        .content
        .posts
        .iter()
        .map(|post| {
            ListItem::new(vec![
                Line::from(Span::styled(
                    post.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(vec![
                    label(&format!("[{}] ", post.category)),
                    label(&post.date.format("%-d %b %Y").to_string()),
                    label(&format!(" · {} min read", post.read_minutes)),
                ]),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().title("Blog").borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::REVERSED),
        );

    let mut state = ListState::default();
    if !app.content.posts.is_empty() {
        state.select(Some(app.blog_selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

pub fn render_post_dialog(frame: &mut Frame, app: &App, index: usize) {
    let Some(post) = app.content.posts.get(index) else {
        return;
    };
    let area = centered_rect(80, 80, frame.area());
    let inner = render_dialog_framework(frame, area, &post.title);

    let text = vec![
        Line::from(vec![
            label("By "),
            Span::raw(post.author.clone()),
            label(&format!("  ·  {}", post.date.format("%-d %B %Y"))),
        ]),
        Line::default(),
        Line::from(Span::styled(
            post.excerpt.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
        Line::from(post.body.clone()),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true }),
        inner,
    );
}

// ============ 诗班 ============

/// 返回进度条区域
pub fn render_choir(frame: &mut Frame, app: &App, area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(3)])
        .split(area);

    let block = Block::default()
        .title("The Glade Choir")
        .borders(Borders::ALL);
    let inner = block.inner(chunks[0]);
    frame.render_widget(block, chunks[0]);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let player = &app.player;
    let status = if player.is_playing() { "▶ Playing" } else { "❚❚ Paused" };
    let mute = if player.is_muted() { "  (muted)" } else { "" };

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                player.track.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            label(&format!("  {}", player.track.artist)),
        ])),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(status, Style::default().fg(Color::Green)),
            label(mute),
        ])),
        rows[1],
    );

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Yellow))
        .ratio(player.progress())
        .label(format!(
            "{} / {}",
            format_time(player.position()),
            format_time(player.duration())
        ));
    frame.render_widget(gauge, rows[3]);

    let items: Vec<ListItem> = app
        .content
        .highlights
        .iter()
        .map(|h| {
            ListItem::new(Line::from(vec![
                Span::raw(format!("{}  ", h.title)),
                Span::styled(h.url.clone(), Style::default().fg(Color::Cyan)),
            ]))
        })
        .collect();
    frame.render_widget(
        List::new(items).block(Block::default().title("Highlights").borders(Borders::ALL)),
        chunks[1],
    );

    rows[3]
}

// ============ 联系 ============

pub fn render_contact(frame: &mut Frame, app: &App, area: Rect) {
    let parish = &app.content.parish;
    let mut lines = vec![
        Line::from(vec![label("Address  "), Span::raw(parish.address.clone())]),
        Line::from(vec![
            label("Map      "),
            Span::styled(map_link(&parish.address), Style::default().fg(Color::Cyan)),
        ]),
        Line::default(),
        Line::from(vec![label("Email    "), Span::raw(parish.email.clone())]),
        Line::from(vec![
            label("Write    "),
            Span::styled(mail_link(&parish.email, None), Style::default().fg(Color::Cyan)),
        ]),
        Line::from(vec![
            label("Giving   "),
            Span::styled(
                mail_link(&parish.email, Some("Donation Request")),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ];
    if !parish.phone.is_empty() {
        lines.push(Line::from(vec![label("Phone    "), Span::raw(parish.phone.clone())]));
    }

    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().title("Visit Us").borders(Borders::ALL)),
        area,
    );
}
