//! Localized push notification templates.
//!
//! Members carry a free-form locale tag; anything that is not a Spanish tag
//! falls back to English. Template text is the only localized surface the
//! engine owns, so it lives here rather than in a translation pipeline.

/// Locales the notification templates ship in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl Locale {
    /// Lenient tag parse: `es`, `es-MX`, `ES` all map to Spanish, everything
    /// else to English.
    pub fn from_tag(tag: &str) -> Self {
        let lowered = tag.to_ascii_lowercase();
        if lowered == "es" || lowered.starts_with("es-") {
            Locale::Es
        } else {
            Locale::En
        }
    }
}

/// Push notification template keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    NewMatch,
    NewLike,
    NewMegaLike,
}

impl NotificationKind {
    /// Android notification channel the push is routed to.
    pub fn channel(&self) -> &'static str {
        match self {
            NotificationKind::NewMatch => "matches",
            NotificationKind::NewLike | NotificationKind::NewMegaLike => "likes",
        }
    }

    /// Value for the payload's `data.type` field; clients route on it.
    pub fn data_type(&self) -> &'static str {
        match self {
            NotificationKind::NewMatch => "new_match",
            NotificationKind::NewLike => "new_like",
            NotificationKind::NewMegaLike => "new_mega_like",
        }
    }

    pub fn title(&self, locale: Locale) -> String {
        let title = match (self, locale) {
            (NotificationKind::NewMatch, Locale::En) => "It's a match!",
            (NotificationKind::NewMatch, Locale::Es) => "¡Es un match!",
            (NotificationKind::NewLike, Locale::En) => "New like",
            (NotificationKind::NewLike, Locale::Es) => "Nuevo like",
            (NotificationKind::NewMegaLike, Locale::En) => "You got a mega-like!",
            (NotificationKind::NewMegaLike, Locale::Es) => "¡Recibiste un mega-like!",
        };
        title.to_string()
    }

    pub fn body(&self, locale: Locale, display_name: &str) -> String {
        match (self, locale) {
            (NotificationKind::NewMatch, Locale::En) => {
                format!("You and {} liked each other. Say hi!", display_name)
            }
            (NotificationKind::NewMatch, Locale::Es) => {
                format!("A {} también le gustas. ¡Saluda!", display_name)
            }
            (NotificationKind::NewLike, Locale::En) => {
                format!("{} liked you", display_name)
            }
            (NotificationKind::NewLike, Locale::Es) => {
                format!("Le gustas a {}", display_name)
            }
            (NotificationKind::NewMegaLike, Locale::En) => {
                format!("{} sent you a mega-like", display_name)
            }
            (NotificationKind::NewMegaLike, Locale::Es) => {
                format!("{} te envió un mega-like", display_name)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_tag_parsing() {
        assert_eq!(Locale::from_tag("es"), Locale::Es);
        assert_eq!(Locale::from_tag("es-MX"), Locale::Es);
        assert_eq!(Locale::from_tag("ES"), Locale::Es);
        assert_eq!(Locale::from_tag("en"), Locale::En);
        assert_eq!(Locale::from_tag("fr"), Locale::En);
        assert_eq!(Locale::from_tag(""), Locale::En);
    }

    #[test]
    fn test_match_template_localizes() {
        let title_en = NotificationKind::NewMatch.title(Locale::En);
        let title_es = NotificationKind::NewMatch.title(Locale::Es);
        assert_eq!(title_en, "It's a match!");
        assert_eq!(title_es, "¡Es un match!");
    }

    #[test]
    fn test_body_substitutes_display_name() {
        let body = NotificationKind::NewLike.body(Locale::En, "Ana");
        assert_eq!(body, "Ana liked you");

        let body = NotificationKind::NewMegaLike.body(Locale::Es, "Ana");
        assert_eq!(body, "Ana te envió un mega-like");
    }

    #[test]
    fn test_channels_route_by_kind() {
        assert_eq!(NotificationKind::NewMatch.channel(), "matches");
        assert_eq!(NotificationKind::NewLike.channel(), "likes");
        assert_eq!(NotificationKind::NewMegaLike.channel(), "likes");
    }
}
