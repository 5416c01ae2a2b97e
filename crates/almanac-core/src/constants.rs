/// Product constants shared by the codec generators
pub const PRODUCT_NAME: &str = "Almanac";
pub const PRODUCT_VENDOR: &str = "Almanac";

/// `PRODID` value written into generated iCalendar and vCard documents.
pub const PRODUCT_ID: &str = const_str::concat!("-//", PRODUCT_VENDOR, "//", PRODUCT_NAME, "//EN");

/// Domain suffix for generated iCalendar UIDs (`<uuid>@<domain>`).
pub const DEFAULT_UID_DOMAIN: &str = "almanac.local";

pub const ICALENDAR_VERSION: &str = "2.0";
pub const VCARD_VERSION: &str = "4.0";

/// Fallback titles used when an imported component has no `SUMMARY`.
pub const UNTITLED_EVENT: &str = "Untitled Event";
pub const UNTITLED_TASK: &str = "Untitled Task";
