//! Calendar documents as exported by common providers.

/// Google Calendar export: `VTIMEZONE`, `TZID` times, folded description.
pub const GOOGLE_EXPORT: &str = "BEGIN:VCALENDAR\r
PRODID:-//Google Inc//Google Calendar 70.9054//EN\r
VERSION:2.0\r
CALSCALE:GREGORIAN\r
METHOD:PUBLISH\r
X-WR-CALNAME:Family\r
X-WR-TIMEZONE:Europe/Berlin\r
BEGIN:VTIMEZONE\r
TZID:Europe/Berlin\r
BEGIN:DAYLIGHT\r
TZOFFSETFROM:+0100\r
TZOFFSETTO:+0200\r
DTSTART:19700329T020000\r
END:DAYLIGHT\r
BEGIN:STANDARD\r
TZOFFSETFROM:+0200\r
TZOFFSETTO:+0100\r
DTSTART:19701025T030000\r
END:STANDARD\r
END:VTIMEZONE\r
BEGIN:VEVENT\r
DTSTART;TZID=Europe/Berlin:20240704T180000\r
DTEND;TZID=Europe/Berlin:20240704T200000\r
DTSTAMP:20240601T120000Z\r
UID:4tl0f3o5u8qg0a9uj2kd6s8e1v@google.com\r
CREATED:20240520T090000Z\r
DESCRIPTION:Bring salad\\, drinks and the folding chairs. Parking is behind\r
  the community hall.\r
LAST-MODIFIED:20240521T100000Z\r
LOCATION:Community Hall\\, Main St. 5\r
SEQUENCE:2\r
STATUS:CONFIRMED\r
SUMMARY:Summer barbecue\r
TRANSP:OPAQUE\r
BEGIN:VALARM\r
ACTION:DISPLAY\r
DESCRIPTION:This is an event reminder\r
TRIGGER:-P0DT0H30M0S\r
END:VALARM\r
END:VEVENT\r
BEGIN:VEVENT\r
DTSTART;VALUE=DATE:20240815\r
DTEND;VALUE=DATE:20240816\r
DTSTAMP:20240601T120000Z\r
UID:birthday-anna@google.com\r
RRULE:FREQ=YEARLY\r
SUMMARY:Anna's birthday\r
CATEGORIES:Birthday,Family\r
END:VEVENT\r
END:VCALENDAR\r
";

/// Apple Reminders export with legacy status spelling and a sub-task.
pub const APPLE_REMINDERS: &str = "BEGIN:VCALENDAR\r
VERSION:2.0\r
PRODID:-//Apple Inc.//iOS 17.0//EN\r
X-WR-CALNAME:Groceries\r
BEGIN:VTODO\r
UID:parent-list-item\r
SUMMARY:Weekly shop\r
STATUS:IN-PROGRESS\r
PRIORITY:5\r
PERCENT-COMPLETE:30\r
DUE;VALUE=DATE:20240120\r
END:VTODO\r
BEGIN:VTODO\r
UID:child-item\r
SUMMARY:Oat milk\r
RELATED-TO;RELTYPE=PARENT:parent-list-item\r
STATUS:NEEDS_ACTION\r
END:VTODO\r
END:VCALENDAR\r
";

/// Outlook-style export with a Windows time zone name and unfolded text.
pub const OUTLOOK_EXPORT: &str = "BEGIN:VCALENDAR\r
PRODID:-//Microsoft Corporation//Outlook 16.0 MIMEDIR//EN\r
VERSION:2.0\r
BEGIN:VEVENT\r
CLASS:PUBLIC\r
DTSTART;TZID=\"W. Europe Standard Time\":20240110T090000\r
DTEND;TZID=\"W. Europe Standard Time\":20240110T100000\r
ORGANIZER;CN=\"Smith, Alex\":mailto:alex.smith@example.com\r
ATTENDEE;ROLE=OPT-PARTICIPANT;PARTSTAT=NEEDS-ACTION;RSVP=TRUE;CN=Kim:mailto:kim@example.com\r
DESCRIPTION:Quarterly numbers\r
and forecast\r
PRIORITY:5\r
SUMMARY;LANGUAGE=en-us:Budget review\r
UID:040000008200E00074C5B7101A82E00800000000\r
END:VEVENT\r
END:VCALENDAR\r
";
