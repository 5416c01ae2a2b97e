//! Static property-name dispatch table for vCard.

/// Properties the contact builder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactProperty {
    Version,
    Uid,
    Kind,
    FormattedName,
    Name,
    Nickname,
    Email,
    Tel,
    Adr,
    Org,
    Title,
    Role,
    Birthday,
    Anniversary,
    Gender,
    Note,
    Url,
    Photo,
    Categories,
    Geo,
    Timezone,
    Lang,
    Rev,
    Unknown,
}

impl ContactProperty {
    /// Looks up an (uppercase) property name.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "VERSION" => Self::Version,
            "UID" => Self::Uid,
            "KIND" | "X-ADDRESSBOOKSERVER-KIND" => Self::Kind,
            "FN" => Self::FormattedName,
            "N" => Self::Name,
            "NICKNAME" => Self::Nickname,
            "EMAIL" => Self::Email,
            "TEL" => Self::Tel,
            "ADR" => Self::Adr,
            "ORG" => Self::Org,
            "TITLE" => Self::Title,
            "ROLE" => Self::Role,
            "BDAY" => Self::Birthday,
            "ANNIVERSARY" | "X-ANNIVERSARY" => Self::Anniversary,
            "GENDER" => Self::Gender,
            "NOTE" => Self::Note,
            "URL" => Self::Url,
            "PHOTO" => Self::Photo,
            "CATEGORIES" => Self::Categories,
            "GEO" => Self::Geo,
            "TZ" => Self::Timezone,
            "LANG" => Self::Lang,
            "REV" => Self::Rev,
            _ => Self::Unknown,
        }
    }
}
