// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Email-safe HTML for a finished newsletter draft.
//!
//! Email clients strip `<style>` and `<link>`, and many ignore modern
//! layout, so the document is built from nested tables with every rule
//! inlined on the element it applies to. The only stylesheet is the
//! Outlook conditional block, which other clients treat as a comment.

use crate::config::SiteProfile;
use crate::draft::NewsletterDraft;
use crate::error::{Error, Result};
use crate::markdown::render_markdown;
use crate::posts::BlogPostRef;
use crate::reads::ReadEntry;
use diagnostics::*;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::path::Path;

/// Inline styles, one per element role.
mod style {
    pub const BODY: &str = "margin: 0; padding: 0; background-color: #FAF8F5; font-family: -apple-system, BlinkMacSystemFont, \"Segoe UI\", Roboto, \"Helvetica Neue\", Arial, sans-serif;";
    pub const PAGE: &str = "background-color: #FAF8F5;";
    pub const CONTAINER: &str = "max-width: 600px; margin: 0 auto; background-color: #FAF8F5;";
    pub const HEADER: &str = "text-align: center; padding: 40px 20px 30px; border-bottom: 2px solid #E5E0D8;";
    pub const LOGO: &str = "font-family: Georgia, \"Times New Roman\", serif; font-size: 28px; font-weight: 700; color: #333333; margin: 0;";
    pub const LOGO_ACCENT: &str = "color: #F97316;";
    pub const DATE: &str = "font-size: 12px; text-transform: uppercase; letter-spacing: 2px; color: #666666; margin-top: 8px;";
    pub const CONTENT: &str = "padding: 30px 24px;";
    pub const SECTION: &str = "margin-bottom: 40px; padding-bottom: 30px; border-bottom: 1px solid #E5E0D8;";
    pub const SECTION_LAST: &str = "margin-bottom: 40px; padding-bottom: 0; border-bottom: none;";
    pub const SECTION_TITLE: &str = "font-family: Georgia, \"Times New Roman\", serif; font-size: 20px; font-weight: 700; color: #333333; margin: 0 0 16px 0; padding-bottom: 8px; border-bottom: 3px solid #F97316; display: inline-block;";
    pub const PROSE: &str = "font-size: 16px; line-height: 1.7; color: #333333;";
    pub const PROSE_P: &str = "margin: 0 0 16px 0;";
    pub const INTRO: &str = "font-size: 16px; line-height: 1.7; color: #333333; margin: 0 0 16px 0;";
    pub const FEATURED: &str = "background-color: #FFFFFF; border: 1px solid #E5E0D8; border-radius: 8px; padding: 20px; margin-top: 16px;";
    pub const FEATURED_LABEL: &str = "font-size: 11px; text-transform: uppercase; letter-spacing: 1px; color: #F97316; font-weight: 600; margin: 0 0 8px 0;";
    pub const FEATURED_TITLE: &str = "font-family: Georgia, \"Times New Roman\", serif; font-size: 18px; font-weight: 700; color: #333333; margin: 0 0 8px 0;";
    pub const FEATURED_TITLE_LINK: &str = "color: #333333; text-decoration: none;";
    pub const FEATURED_SUBTITLE: &str = "font-size: 14px; color: #666666; font-style: italic; margin: 0 0 16px 0;";
    pub const BUTTON: &str = "display: inline-block; background-color: #F97316; color: #FFFFFF; padding: 10px 20px; border-radius: 6px; text-decoration: none; font-weight: 500; font-size: 14px;";
    pub const READ_ITEM: &str = "margin-bottom: 20px; padding-bottom: 20px; border-bottom: 1px dashed #E5E0D8;";
    pub const READ_ITEM_LAST: &str = "margin-bottom: 0; padding-bottom: 0; border-bottom: none;";
    pub const READ_TITLE: &str = "font-size: 15px; font-weight: 600; margin: 0 0 6px 0;";
    pub const READ_TITLE_LINK: &str = "color: #333333; text-decoration: none; border-bottom: 1px solid #F97316;";
    pub const READ_COMMENTARY: &str = "font-size: 14px; color: #666666; line-height: 1.5; margin: 0;";
    pub const ALL_READS: &str = "margin-top: 20px;";
    pub const ALL_READS_LINK: &str = "color: #F97316; text-decoration: none; font-weight: 500;";
    pub const FOOTER: &str = "background-color: #333333; color: #FAF8F5; padding: 40px 24px; text-align: center;";
    pub const FOOTER_TITLE: &str = "font-family: Georgia, \"Times New Roman\", serif; font-size: 18px; font-weight: 700; color: #FAF8F5; margin: 0 0 12px 0;";
    pub const FOOTER_TEXT: &str = "font-size: 14px; color: #CCCCCC; line-height: 1.6; margin: 0 0 20px 0;";
    pub const FOOTER_FORWARD: &str = "font-size: 14px; color: #CCCCCC; line-height: 1.6; margin: 0 0 20px 0; font-style: italic;";
    pub const FOOTER_LINK: &str = "color: #F97316; text-decoration: none;";
    pub const SOCIAL_LINKS: &str = "margin-bottom: 20px;";
    pub const SOCIAL_LINK: &str = "display: inline-block; margin: 0 12px; color: #FAF8F5; text-decoration: none;";
    pub const FOOTER_LEGAL: &str = "font-size: 12px; color: #999999; border-top: 1px solid #444444; padding-top: 20px; margin-top: 20px;";
    pub const LEGAL_FIRST: &str = "margin: 0;";
    pub const LEGAL_NEXT: &str = "margin: 8px 0 0 0;";
    pub const VIEW_ONLINE: &str = "font-size: 12px; color: #666666; text-align: center; padding: 16px;";
    pub const VIEW_ONLINE_LINK: &str = "color: #F97316; text-decoration: none;";
}

/// Outlook ignores the font stack on `body`.
const MSO_STYLE: &str = "<!--[if mso]>
<style type=\"text/css\">
  body, table, td {font-family: Arial, Helvetica, sans-serif !important;}
</style>
<![endif]-->";

/// Render the email for `draft`.
///
/// Pure: every link is derived from `site` and the draft's slug, never
/// from its editable month and year.
pub fn render_email(
    draft: &NewsletterDraft,
    featured: Option<&BlogPostRef>,
    reads: &[ReadEntry],
    site: &SiteProfile,
) -> Result<String> {
    let retrospective = render_markdown(&draft.body_prose, Some(style::PROSE_P))?;
    let newsletter_url = site.newsletter_url(&draft.slug);

    let markup = html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta http-equiv="X-UA-Compatible" content="IE=edge";
                title { (draft.title) " | " (site.author) }
                (PreEscaped(MSO_STYLE))
            }
            body style=(style::BODY) {
                (layout_table(style::PAGE, html! {
                    tr {
                        td style=(style::VIEW_ONLINE) {
                            a href=(newsletter_url) style=(style::VIEW_ONLINE_LINK) {
                                "View this newsletter online"
                            }
                        }
                    }
                }))
                (layout_table(style::PAGE, html! {
                    tr {
                        td align="center" {
                            table width="600" cellpadding="0" cellspacing="0" border="0" style=(style::CONTAINER) {
                                tr {
                                    td style=(style::HEADER) {
                                        (masthead(&site.newsletter_name))
                                        p style=(style::DATE) { (draft.month) " " (draft.year) }
                                    }
                                }
                                tr {
                                    td style=(style::CONTENT) {
                                        (retrospective_section(&retrospective))
                                        @if let Some(post) = featured {
                                            (featured_section(post, site))
                                        }
                                        (reads_section(reads, site))
                                    }
                                }
                                tr {
                                    td style=(style::FOOTER) {
                                        (footer(site))
                                    }
                                }
                            }
                        }
                    }
                }))
            }
        }
    };
    Ok(markup.into_string())
}

/// Full-width layout table.
fn layout_table(table_style: &str, rows: Markup) -> Markup {
    html! {
        table width="100%" cellpadding="0" cellspacing="0" border="0" style=(table_style) {
            (rows)
        }
    }
}

/// Newsletter name with its last word in the accent color.
fn masthead(name: &str) -> Markup {
    let name = name.trim();
    let (lead, accent) = match name.rsplit_once(' ') {
        Some((lead, last)) => (Some(lead), last),
        None => (None, name),
    };
    html! {
        h1 style=(style::LOGO) {
            @if let Some(lead) = lead {
                (lead) " "
            }
            span style=(style::LOGO_ACCENT) { (accent) }
        }
    }
}

fn retrospective_section(body_html: &str) -> Markup {
    layout_table(style::SECTION, html! {
        tr {
            td {
                h2 style=(style::SECTION_TITLE) { "The Retrospective" }
                div style=(style::PROSE) {
                    (PreEscaped(body_html))
                }
            }
        }
    })
}

fn featured_section(post: &BlogPostRef, site: &SiteProfile) -> Markup {
    let url = post.absolute_url(site.base());
    layout_table(style::SECTION, html! {
        tr {
            td {
                h2 style=(style::SECTION_TITLE) { "Latest Essay" }
                (layout_table(style::FEATURED, html! {
                    tr {
                        td {
                            p style=(style::FEATURED_LABEL) { "Featured Post" }
                            h3 style=(style::FEATURED_TITLE) {
                                a href=(url) style=(style::FEATURED_TITLE_LINK) { (post.title) }
                            }
                            @if let Some(subtitle) = &post.subtitle {
                                p style=(style::FEATURED_SUBTITLE) { (subtitle) }
                            }
                            a href=(url) style=(style::BUTTON) { "Read the full post" }
                        }
                    }
                }))
            }
        }
    })
}

fn reads_section(reads: &[ReadEntry], site: &SiteProfile) -> Markup {
    layout_table(style::SECTION_LAST, html! {
        tr {
            td {
                h2 style=(style::SECTION_TITLE) { "This Month's Reads" }
                p style=(style::INTRO) {
                    "A curated selection of articles that caught my attention this month."
                }
                @for (index, read) in reads.iter().enumerate() {
                    (layout_table(read_item_style(index, reads.len()), html! {
                        tr {
                            td {
                                p style=(style::READ_TITLE) {
                                    a href=(read.url) style=(style::READ_TITLE_LINK) { (read.title) }
                                }
                                @if let Some(commentary) = read.display_commentary() {
                                    p style=(style::READ_COMMENTARY) { (commentary) }
                                }
                            }
                        }
                    }))
                }
                p style=(style::ALL_READS) {
                    a href=(format!("{}/reads/", site.base())) style=(style::ALL_READS_LINK) {
                        "View all reads \u{2192}"
                    }
                }
            }
        }
    })
}

fn read_item_style(index: usize, count: usize) -> &'static str {
    if index + 1 == count {
        style::READ_ITEM_LAST
    } else {
        style::READ_ITEM
    }
}

fn footer(site: &SiteProfile) -> Markup {
    html! {
        h3 style=(style::FOOTER_TITLE) { "Let's Continue the Conversation" }
        p style=(style::FOOTER_TEXT) {
            "Found something valuable here? I'd love to hear your thoughts. "
            @if let Some(email) = &site.reply_email {
                a href=(format!("mailto:{}", email)) style=(style::FOOTER_LINK) { "Reply to this email" }
            } @else {
                "Reply to this email"
            }
            @if site.social.is_empty() {
                "."
            } @else {
                " or connect with me on social media."
            }
        }
        @if !site.social.is_empty() {
            (layout_table(style::SOCIAL_LINKS, html! {
                tr {
                    td align="center" {
                        @for link in &site.social {
                            a href=(link.url) style=(style::SOCIAL_LINK) { (link.label) }
                        }
                    }
                }
            }))
        }
        p style=(style::FOOTER_FORWARD) { "Know someone who'd enjoy this? Forward it along!" }
        div style=(style::FOOTER_LEGAL) {
            p style=(style::LEGAL_FIRST) {
                a href=(format!("{}/", site.base())) style=(style::FOOTER_LINK) { (site.display_host()) }
                @if let Some(location) = &site.location {
                    " \u{2022} " (location)
                }
            }
            p style=(style::LEGAL_NEXT) {
                a href=(format!("{}/newsletter/", site.base())) style=(style::FOOTER_LINK) {
                    "View past newsletters"
                }
            }
        }
    }
}

/// Write the rendered document, creating parent directories.
pub fn write_email(html: &str, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    std::fs::write(path, html).map_err(|e| Error::io(path, e))?;
    log_info!("Wrote email {path}", path: path.display().to_string());
    Ok(())
}
