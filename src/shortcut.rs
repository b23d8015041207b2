//! Shortcut types and default seed data
//!
//! A shortcut is a user-defined link shown as a clickable tile. Two kinds:
//! - `Web`: opens an http(s) URL
//! - `App`: invokes an external application via a custom URL scheme, with an
//!   optional web fallback

use crate::validate;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The category whose group is hidden while focus mode is on
pub const ENTERTAINMENT_CATEGORY: &str = "Giải trí";

/// Kind of shortcut target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortcutKind {
    /// Standard http(s) link
    Web,
    /// Application protocol link (e.g. `discord://`)
    App,
}

impl ShortcutKind {
    /// Get the string representation of the shortcut kind
    pub fn as_str(&self) -> &'static str {
        match self {
            ShortcutKind::Web => "web",
            ShortcutKind::App => "app",
        }
    }
}

impl FromStr for ShortcutKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "web" => Ok(ShortcutKind::Web),
            "app" => Ok(ShortcutKind::App),
            _ => Err(Error::InvalidShortcut(format!("Unknown shortcut kind: {}", s))),
        }
    }
}

impl std::fmt::Display for ShortcutKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user-defined link shown as a tile on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shortcut {
    /// Unique, stable identifier
    pub id: String,
    /// Display title
    pub title: String,
    /// Symbolic icon name, resolved by the rendering layer
    pub icon: String,
    /// Soft grouping key; deleting every shortcut in a category removes it
    pub category: String,
    /// Tooltip text; may contain paragraph breaks
    pub description: String,
    /// Primary target: `https://` for web, `protocol://` for apps
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ShortcutKind,
    /// Web fallback for when an app protocol fails to launch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_url: Option<String>,
    /// Search aids for the command palette
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
}

impl Shortcut {
    /// Create a new shortcut with the required fields
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        icon: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        url: impl Into<String>,
        kind: ShortcutKind,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: icon.into(),
            category: category.into(),
            description: description.into(),
            url: url.into(),
            kind,
            fallback_url: None,
            keywords: None,
        }
    }

    /// Set the web fallback URL
    pub fn with_fallback(mut self, url: impl Into<String>) -> Self {
        self.fallback_url = Some(url.into());
        self
    }

    /// Set the command-palette search keywords
    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.keywords = Some(keywords.iter().map(|k| k.to_string()).collect());
        self
    }

    /// Check the shortcut's URL invariants for its kind
    pub fn validate(&self) -> Result<()> {
        if !validate::is_valid_title(&self.title) {
            return Err(Error::InvalidShortcut("title must not be empty".into()));
        }
        if self.url.is_empty() {
            return Err(Error::InvalidShortcut("url must not be empty".into()));
        }
        match self.kind {
            ShortcutKind::Web if !validate::is_valid_web_url(&self.url) => Err(
                Error::InvalidShortcut(format!("not an http(s) URL: {}", self.url)),
            ),
            ShortcutKind::App if !validate::is_valid_protocol_url(&self.url) => Err(
                Error::InvalidShortcut(format!("not a protocol URL: {}", self.url)),
            ),
            _ => Ok(()),
        }
    }
}

/// Shallow field merge applied by the update-by-id operation.
///
/// Present fields replace the stored value; absent fields pass through.
#[derive(Debug, Clone, Default)]
pub struct ShortcutPatch {
    pub title: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub kind: Option<ShortcutKind>,
    pub fallback_url: Option<String>,
    pub keywords: Option<Vec<String>>,
}

impl ShortcutPatch {
    /// Merge this patch into a shortcut
    pub fn apply_to(&self, shortcut: &mut Shortcut) {
        if let Some(title) = &self.title {
            shortcut.title = title.clone();
        }
        if let Some(icon) = &self.icon {
            shortcut.icon = icon.clone();
        }
        if let Some(category) = &self.category {
            shortcut.category = category.clone();
        }
        if let Some(description) = &self.description {
            shortcut.description = description.clone();
        }
        if let Some(url) = &self.url {
            shortcut.url = url.clone();
        }
        if let Some(kind) = self.kind {
            shortcut.kind = kind;
        }
        if let Some(fallback_url) = &self.fallback_url {
            shortcut.fallback_url = Some(fallback_url.clone());
        }
        if let Some(keywords) = &self.keywords {
            shortcut.keywords = Some(keywords.clone());
        }
    }
}

/// The default seed collection shown on first run: 13 shortcuts across
/// the categories "Giải trí", "Công việc" and "Công cụ AI"
pub fn default_shortcuts() -> Vec<Shortcut> {
    vec![
        // Giải trí
        Shortcut::new(
            "youtube",
            "YouTube",
            "Youtube",
            "Giải trí",
            "Watch videos, tutorials, music, and entertainment content",
            "https://www.youtube.com",
            ShortcutKind::Web,
        )
        .with_keywords(&["video", "watch", "music", "entertainment"]),
        Shortcut::new(
            "facebook",
            "Facebook",
            "Facebook",
            "Giải trí",
            "Connect with friends and family, share updates and photos",
            "https://www.facebook.com",
            ShortcutKind::Web,
        )
        .with_keywords(&["social", "friends", "photos"]),
        Shortcut::new(
            "tiktok",
            "TikTok",
            "Video",
            "Giải trí",
            "Short-form video content and trending challenges",
            "https://www.tiktok.com",
            ShortcutKind::Web,
        )
        .with_keywords(&["video", "shorts", "trending"]),
        Shortcut::new(
            "discord",
            "Discord",
            "MessageSquare",
            "Giải trí",
            "Voice, video, and text chat with communities and friends",
            "discord://",
            ShortcutKind::App,
        )
        .with_fallback("https://discord.com/app")
        .with_keywords(&["chat", "voice", "community", "gaming"]),
        Shortcut::new(
            "revoltpc",
            "RevoltPC",
            "MessageCircle",
            "Giải trí",
            "Privacy-focused Discord alternative with end-to-end encryption",
            "revoltPC://",
            ShortcutKind::App,
        )
        .with_fallback("https://app.revolt.chat")
        .with_keywords(&["chat", "privacy", "community"]),
        // Công việc
        Shortcut::new(
            "zalo",
            "Zalo",
            "MessageSquare",
            "Công việc",
            "Vietnamese messaging and collaboration platform",
            "Zalo://",
            ShortcutKind::App,
        )
        .with_fallback("https://chat.zalo.me")
        .with_keywords(&["chat", "messaging", "vietnam", "work"]),
        Shortcut::new(
            "github",
            "GitHub",
            "Github",
            "Công việc",
            "Code repository hosting, version control, and collaboration",
            "https://github.com",
            ShortcutKind::Web,
        )
        .with_keywords(&["code", "git", "repository", "developer"]),
        Shortcut::new(
            "antigravity",
            "Antigravity",
            "Sparkles",
            "Công việc",
            "AI-powered development platform and coding assistant",
            "Antigravity://",
            ShortcutKind::App,
        )
        .with_fallback("https://antigravity.dev")
        .with_keywords(&["ai", "coding", "assistant", "development"]),
        // Công cụ AI
        Shortcut::new(
            "chatgpt",
            "ChatGPT",
            "MessageSquare",
            "Công cụ AI",
            "Versatile AI assistant for writing, coding, brainstorming, and general tasks.\n\nBest for: Creative writing, code explanation, tutoring, brainstorming ideas.",
            "https://chat.openai.com",
            ShortcutKind::Web,
        )
        .with_keywords(&["ai", "chat", "assistant", "gpt", "openai"]),
        Shortcut::new(
            "claude",
            "Claude",
            "Bot",
            "Công cụ AI",
            "Advanced AI assistant with strong reasoning and long-context understanding.\n\nBest for: Analyzing long documents, nuanced reasoning, coding with context.",
            "https://claude.ai",
            ShortcutKind::Web,
        )
        .with_keywords(&["ai", "chat", "assistant", "anthropic", "reasoning"]),
        Shortcut::new(
            "gemini",
            "Gemini",
            "Sparkles",
            "Công cụ AI",
            "Google's multimodal AI with deep integration to Google services.\n\nBest for: Research, fact-checking, multimodal tasks (text + images).",
            "https://gemini.google.com",
            ShortcutKind::Web,
        )
        .with_keywords(&["ai", "chat", "assistant", "google", "research"]),
        Shortcut::new(
            "perplexity",
            "Perplexity",
            "Search",
            "Công cụ AI",
            "AI-powered search engine with cited sources and real-time information.\n\nBest for: Research with citations, fact-checking, current information.",
            "https://www.perplexity.ai",
            ShortcutKind::Web,
        )
        .with_keywords(&["ai", "search", "research", "sources", "citations"]),
        Shortcut::new(
            "deepseek",
            "DeepSeek",
            "Brain",
            "Công cụ AI",
            "Open-source AI focused on coding and technical tasks.\n\nBest for: Code generation, debugging, technical documentation.",
            "https://chat.deepseek.com",
            ShortcutKind::Web,
        )
        .with_keywords(&["ai", "chat", "coding", "programming", "technical"]),
    ]
}

/// Group shortcuts by category, preserving first-seen category order
pub fn group_by_category(shortcuts: &[Shortcut]) -> Vec<(String, Vec<Shortcut>)> {
    let mut grouped: Vec<(String, Vec<Shortcut>)> = Vec::new();

    for shortcut in shortcuts {
        match grouped.iter_mut().find(|(name, _)| *name == shortcut.category) {
            Some((_, group)) => group.push(shortcut.clone()),
            None => grouped.push((shortcut.category.clone(), vec![shortcut.clone()])),
        }
    }

    grouped
}

/// Filter shortcuts by a case-insensitive search query over title,
/// description, category and keywords
pub fn filter_shortcuts(shortcuts: &[Shortcut], query: &str) -> Vec<Shortcut> {
    let query = query.trim().to_lowercase();

    if query.is_empty() {
        return shortcuts.to_vec();
    }

    shortcuts
        .iter()
        .filter(|shortcut| {
            let mut haystack = format!(
                "{} {} {}",
                shortcut.title, shortcut.description, shortcut.category
            );
            if let Some(keywords) = &shortcut.keywords {
                haystack.push(' ');
                haystack.push_str(&keywords.join(" "));
            }
            haystack.to_lowercase().contains(&query)
        })
        .cloned()
        .collect()
}

/// Shortcuts visible under the focus-mode flag: entertainment is hidden
/// while focus mode is on
pub fn visible_shortcuts(shortcuts: &[Shortcut], focus_mode: bool) -> Vec<Shortcut> {
    if !focus_mode {
        return shortcuts.to_vec();
    }

    shortcuts
        .iter()
        .filter(|shortcut| shortcut.category != ENTERTAINMENT_CATEGORY)
        .cloned()
        .collect()
}
