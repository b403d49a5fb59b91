use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Renderable icon variants for services. Closed set: unknown tags fall
/// back to `Shield` so a stale record can never break rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceIcon {
    Globe,
    Palette,
    ShoppingCart,
    Smartphone,
    ShieldCheck,
    Cloud,
    Shield,
    Code,
    Lock,
    Zap,
}

impl ServiceIcon {
    pub const ALL: [ServiceIcon; 10] = [
        ServiceIcon::Globe,
        ServiceIcon::Palette,
        ServiceIcon::ShoppingCart,
        ServiceIcon::Smartphone,
        ServiceIcon::ShieldCheck,
        ServiceIcon::Cloud,
        ServiceIcon::Shield,
        ServiceIcon::Code,
        ServiceIcon::Lock,
        ServiceIcon::Zap,
    ];

    /// Resolve a stored tag, falling back to the default variant
    pub fn from_tag(tag: &str) -> ServiceIcon {
        Self::ALL
            .iter()
            .copied()
            .find(|icon| icon.tag() == tag)
            .unwrap_or_default()
    }

    pub fn tag(&self) -> &'static str {
        match self {
            ServiceIcon::Globe => "Globe",
            ServiceIcon::Palette => "Palette",
            ServiceIcon::ShoppingCart => "ShoppingCart",
            ServiceIcon::Smartphone => "Smartphone",
            ServiceIcon::ShieldCheck => "ShieldCheck",
            ServiceIcon::Cloud => "Cloud",
            ServiceIcon::Shield => "Shield",
            ServiceIcon::Code => "Code",
            ServiceIcon::Lock => "Lock",
            ServiceIcon::Zap => "Zap",
        }
    }

    /// Terminal glyph for CLI listings
    pub fn glyph(&self) -> &'static str {
        match self {
            ServiceIcon::Globe => "🌐",
            ServiceIcon::Palette => "🎨",
            ServiceIcon::ShoppingCart => "🛒",
            ServiceIcon::Smartphone => "📱",
            ServiceIcon::ShieldCheck | ServiceIcon::Shield => "🛡",
            ServiceIcon::Cloud => "☁",
            ServiceIcon::Code => "⌨",
            ServiceIcon::Lock => "🔒",
            ServiceIcon::Zap => "⚡",
        }
    }
}

impl Default for ServiceIcon {
    fn default() -> Self {
        ServiceIcon::Shield
    }
}

/// A marketing service entry shown on the public site.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Service {
    pub id: Uuid,
    pub icon: String,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Service {
    pub fn icon(&self) -> ServiceIcon {
        ServiceIcon::from_tag(&self.icon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_round_trip() {
        for icon in ServiceIcon::ALL {
            assert_eq!(ServiceIcon::from_tag(icon.tag()), icon);
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_default() {
        assert_eq!(ServiceIcon::from_tag("Rocket"), ServiceIcon::Shield);
        assert_eq!(ServiceIcon::from_tag(""), ServiceIcon::Shield);
    }
}
