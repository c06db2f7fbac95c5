use chrono::{Datelike, NaiveDate, NaiveTime, Weekday};
use log::{debug, info, warn};
use web_sys::{Document, Event, Window};

use crate::config::REDIRECT_DELAY_MS;
use crate::dom::{self, BrowserBookingEffects, PageError};
use crate::platform::BookingEffects;

/// Validation failures. `Display` is the alert shown to the visitor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Consultations are available on weekends only (Saturday & Sunday).")]
    WeekdayNotAllowed,
    #[error("Please enter a valid date and time")]
    InvalidDateTime,
}

/// Raw values as typed into the booking form.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingForm<'a> {
    pub full_name: &'a str,
    pub location: &'a str,
    pub date: &'a str,
    pub time: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub full_name: String,
    pub location: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl BookingRequest {
    /// Checks run in order and the first failure wins: every field present,
    /// then a weekend date.
    pub fn from_form(form: &BookingForm<'_>) -> Result<Self, BookingError> {
        let full_name = form.full_name.trim();
        let location = form.location.trim();
        let date = form.date.trim();
        let time = form.time.trim();

        if full_name.is_empty() || location.is_empty() || date.is_empty() || time.is_empty() {
            return Err(BookingError::MissingFields);
        }

        let date = parse_date(date)?;
        if !is_weekend(date) {
            return Err(BookingError::WeekdayNotAllowed);
        }
        let time = parse_time(time)?;

        Ok(Self {
            full_name: full_name.to_string(),
            location: location.to_string(),
            date,
            time,
        })
    }

    pub fn formatted_date(&self) -> String {
        format_long_date(self.date)
    }

    pub fn formatted_time(&self) -> String {
        format_clock_time(self.time)
    }

    pub fn message(&self) -> String {
        format!(
            "Hello The Skin Investor 🌿\n\
             \n\
             I would like to book a skincare consultation.\n\
             \n\
             Name: {name}\n\
             Location: {location}\n\
             \n\
             Preferred Appointment:\n\
             Date: {date}\n\
             Time: {time}\n\
             \n\
             I will proceed with payment and complete the consultation form.\n\
             \n\
             Kindly confirm availability.\n\
             Thank you.",
            name = self.full_name,
            location = self.location,
            date = self.formatted_date(),
            time = self.formatted_time(),
        )
    }

    pub fn whatsapp_link(&self, phone: &str) -> String {
        whatsapp_link(phone, &self.message())
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, BookingError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| BookingError::InvalidDateTime)
}

// Time inputs report seconds, and fractions of them, when a step below one
// minute is set.
fn parse_time(raw: &str) -> Result<NaiveTime, BookingError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S%.f"))
        .map_err(|_| BookingError::InvalidDateTime)
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// `2025-11-08` becomes `Saturday, November 8, 2025`.
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// `14:30` becomes `2:30 PM`, `00:15` becomes `12:15 AM`.
pub fn format_clock_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

pub fn whatsapp_link(phone: &str, message: &str) -> String {
    format!("https://wa.me/{}?text={}", phone, urlencoding::encode(message))
}

/// Value for the date input's `min` attribute.
pub fn min_date_attribute(today: NaiveDate) -> String {
    today.format("%Y-%m-%d").to_string()
}

/// Validates the form and either alerts or confirms and schedules the
/// WhatsApp redirect to `phone`. Returns the link that will be opened.
pub fn submit<E: BookingEffects>(
    form: &BookingForm<'_>,
    phone: &str,
    effects: &E,
) -> Result<String, BookingError> {
    match BookingRequest::from_form(form) {
        Ok(request) => {
            let link = request.whatsapp_link(phone);
            effects.show_confirmation();
            effects.open_after_delay(link.clone(), REDIRECT_DELAY_MS);
            Ok(link)
        }
        Err(err) => {
            effects.alert(&err.to_string());
            Err(err)
        }
    }
}

pub fn attach(window: &Window, document: &Document, phone: String) -> Result<(), PageError> {
    if let Some(date_input) = dom::input_by_id(document, "preferredDate") {
        let today = chrono::Local::now().date_naive();
        if let Err(err) = date_input.set_attribute("min", &min_date_attribute(today)) {
            warn!("Could not set minimum booking date: {:?}", err);
        }
    }

    let Some(form) = document.get_element_by_id("bookingForm") else {
        debug!("No #bookingForm on page");
        return Ok(());
    };

    let effects = BrowserBookingEffects::new(
        window.clone(),
        document.get_element_by_id("successModal"),
    );
    let document = document.clone();

    dom::listen(&form, "submit", move |event: Event| {
        event.prevent_default();

        let full_name = dom::input_value(&document, "fullName");
        let location = dom::input_value(&document, "location");
        let date = dom::input_value(&document, "preferredDate");
        let time = dom::input_value(&document, "preferredTime");
        let form = BookingForm {
            full_name: &full_name,
            location: &location,
            date: &date,
            time: &time,
        };

        match submit(&form, &phone, &effects) {
            Ok(_) => info!("Booking request confirmed, opening WhatsApp"),
            Err(err) => debug!("Booking rejected: {:?}", err),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WHATSAPP_NUMBER;
    use crate::platform::fakes::{Effect, RecordingEffects};

    fn form<'a>(date: &'a str, time: &'a str) -> BookingForm<'a> {
        BookingForm {
            full_name: "Ama Mensah",
            location: "East Legon, Accra",
            date,
            time,
        }
    }

    fn decoded_text(link: &str) -> String {
        let encoded = link
            .strip_prefix("https://wa.me/233261577159?text=")
            .expect("link prefix");
        urlencoding::decode(encoded).expect("valid utf-8").into_owned()
    }

    #[test]
    fn formats_clock_time_in_twelve_hours() {
        let fmt = |raw: &str| format_clock_time(parse_time(raw).unwrap());
        assert_eq!(fmt("14:30"), "2:30 PM");
        assert_eq!(fmt("00:15"), "12:15 AM");
        assert_eq!(fmt("12:00"), "12:00 PM");
        assert_eq!(fmt("09:05"), "9:05 AM");
        assert_eq!(fmt("23:59:00"), "11:59 PM");
        assert_eq!(fmt("14:30:15.123"), "2:30 PM");
    }

    #[test]
    fn formats_long_date() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 8).unwrap();
        assert_eq!(format_long_date(date), "Saturday, November 8, 2025");
    }

    #[test]
    fn weekend_booking_builds_link_without_alert() {
        let effects = RecordingEffects::default();
        let link = submit(&form("2025-11-08", "14:30"), WHATSAPP_NUMBER, &effects).unwrap();

        assert!(effects.alerts().is_empty());
        assert_eq!(
            effects.effects(),
            vec![
                Effect::ShowConfirmation,
                Effect::OpenAfterDelay(link.clone(), REDIRECT_DELAY_MS),
            ]
        );

        let text = decoded_text(&link);
        assert!(text.starts_with("Hello The Skin Investor 🌿\n\nI would like"));
        assert!(text.contains("Name: Ama Mensah\nLocation: East Legon, Accra\n"));
        assert!(text.contains("Date: Saturday, November 8, 2025\nTime: 2:30 PM\n"));
        assert!(text.ends_with("Kindly confirm availability.\nThank you."));
    }

    #[test]
    fn link_text_is_percent_encoded() {
        let effects = RecordingEffects::default();
        let link = submit(&form("2025-11-09", "10:00"), WHATSAPP_NUMBER, &effects).unwrap();
        let query = link.split_once("?text=").unwrap().1;

        assert!(!query.contains(' '));
        assert!(!query.contains('\n'));
        assert!(query.contains("Name%3A%20Ama%20Mensah%0ALocation%3A%20East%20Legon%2C%20Accra"));
        assert!(query.starts_with("Hello%20The%20Skin%20Investor%20%F0%9F%8C%BF%0A"));
    }

    #[test]
    fn sunday_is_accepted() {
        let effects = RecordingEffects::default();
        let link = submit(&form("2025-11-09", "00:15"), WHATSAPP_NUMBER, &effects).unwrap();
        let text = decoded_text(&link);
        assert!(text.contains("Date: Sunday, November 9, 2025\nTime: 12:15 AM"));
    }

    #[test]
    fn weekdays_are_rejected() {
        // 2025-11-03 is a Monday.
        for day in 3..=7 {
            let date = format!("2025-11-{:02}", day);
            let effects = RecordingEffects::default();
            let result = submit(&form(&date, "14:30"), WHATSAPP_NUMBER, &effects);

            assert_eq!(result, Err(BookingError::WeekdayNotAllowed));
            assert_eq!(
                effects.alerts(),
                vec!["Consultations are available on weekends only (Saturday & Sunday).".to_string()]
            );
            assert!(effects.opened().is_empty());
        }
    }

    #[test]
    fn any_blank_field_stops_with_missing_fields_alert() {
        let full = form("2025-11-08", "14:30");
        let cases = [
            BookingForm { full_name: "   ", ..full },
            BookingForm { location: "", ..full },
            BookingForm { date: "", ..full },
            BookingForm { time: " ", ..full },
        ];

        for case in cases {
            let effects = RecordingEffects::default();
            assert_eq!(submit(&case, WHATSAPP_NUMBER, &effects), Err(BookingError::MissingFields));
            assert_eq!(
                effects.effects(),
                vec![Effect::Alert("Please fill in all fields".to_string())]
            );
        }
    }

    #[test]
    fn missing_fields_win_over_weekday() {
        let case = BookingForm {
            full_name: "",
            ..form("2025-11-05", "14:30")
        };
        assert_eq!(
            BookingRequest::from_form(&case),
            Err(BookingError::MissingFields)
        );
    }

    #[test]
    fn name_and_location_are_trimmed() {
        let case = BookingForm {
            full_name: "  Kofi  ",
            location: "\tKumasi ",
            ..form("2025-11-08", "08:00")
        };
        let request = BookingRequest::from_form(&case).unwrap();
        assert_eq!(request.full_name, "Kofi");
        assert_eq!(request.location, "Kumasi");
    }

    #[test]
    fn millisecond_step_time_is_booked() {
        let effects = RecordingEffects::default();
        let link = submit(&form("2025-11-08", "09:45:00.500"), WHATSAPP_NUMBER, &effects).unwrap();

        assert!(effects.alerts().is_empty());
        assert!(decoded_text(&link).contains("Time: 9:45 AM\n"));
    }

    #[test]
    fn garbage_date_or_time_is_rejected() {
        assert_eq!(
            BookingRequest::from_form(&form("2025-02-30", "14:30")),
            Err(BookingError::InvalidDateTime)
        );
        assert_eq!(
            BookingRequest::from_form(&form("2025-11-08", "2pm")),
            Err(BookingError::InvalidDateTime)
        );
    }

    #[test]
    fn min_date_is_iso_formatted() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(min_date_attribute(today), "2026-03-07");
    }
}
