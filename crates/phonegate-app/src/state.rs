//! Observable application state types.
//!
//! These structures are the view model: what the front-end needs to draw the
//! two screens, without any access to the tracker or its storage.

use std::time::Duration;

use phonegate_core::{COUNTRIES, Country, format_phone_number, format_remaining};

/// National digits required before the phone can be submitted.
pub const PHONE_DIGITS: usize = 10;

/// Digits in an SMS code. The code is submitted as soon as it is complete.
pub const CODE_LENGTH: usize = 6;

/// Which screen is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Phone number entry.
    Phone(PhoneForm),
    /// SMS code entry.
    Code(CodeForm),
}

/// Phone screen state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneForm {
    /// Entered national digits, at most [`PHONE_DIGITS`].
    pub digits: String,
    /// Index into [`COUNTRIES`] of the selected country.
    pub country: usize,
    /// Highlighted row while the country picker is open. `None` if closed.
    pub picker: Option<usize>,
}

impl PhoneForm {
    /// Selected country.
    pub fn country(&self) -> &'static Country {
        COUNTRIES.get(self.country).unwrap_or(&COUNTRIES[0])
    }

    /// All digits entered.
    pub fn is_complete(&self) -> bool {
        self.digits.len() == PHONE_DIGITS
    }

    /// Digits grouped for display, e.g. `999 123 45 67`.
    pub fn formatted(&self) -> String {
        format_phone_number(&self.digits)
    }

    /// Number as shown on the code screen, e.g. `+7 999 123 45 67`.
    pub fn full_number(&self) -> String {
        format!("{} {}", self.country().prefix, self.formatted())
    }
}

/// Code screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeForm {
    /// Number the code was "sent" to.
    pub phone: String,
    /// Entered code digits, at most [`CODE_LENGTH`].
    pub code: String,
    /// Seconds until the code may be resent. Zero means resend is available.
    pub resend_in: u32,
}

impl CodeForm {
    /// Fresh code screen for `phone`.
    pub fn new(phone: String, resend_in: u32) -> Self {
        Self { phone, code: String::new(), resend_in }
    }
}

/// Inline message shown under the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// Active block with countdown text. Refreshed every tick and cleared
    /// automatically once the block lifts.
    Lockout(String),
    /// The submitted code was rejected.
    WrongCode,
    /// Blocked state could not be confirmed after the phone request.
    AccessRestricted,
    /// Blocked state could not be confirmed after the code request.
    Failed,
}

impl Notice {
    /// Lockout notice for the given remaining time.
    pub fn lockout(remaining: Duration) -> Self {
        let ms = u64::try_from(remaining.as_millis()).unwrap_or(u64::MAX);
        Self::Lockout(format!("Слишком много попыток. Попробуйте через {}.", format_remaining(ms)))
    }

    /// Text shown to the user.
    pub fn text(&self) -> &str {
        match self {
            Self::Lockout(text) => text,
            Self::WrongCode => "Неверный код. Попробуйте еще раз.",
            Self::AccessRestricted => "Доступ ограничен",
            Self::Failed => "Ошибка",
        }
    }

    /// Whether this notice reflects an active block.
    pub fn is_lockout(&self) -> bool {
        matches!(self, Self::Lockout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lockout_text_embeds_countdown() {
        assert_eq!(
            Notice::lockout(Duration::from_secs(125)).text(),
            "Слишком много попыток. Попробуйте через 2:05."
        );
        assert_eq!(
            Notice::lockout(Duration::from_secs(24 * 3_600 - 1)).text(),
            "Слишком много попыток. Попробуйте через 23 ч 59 мин."
        );
    }

    #[test]
    fn full_number_uses_selected_prefix() {
        let form = PhoneForm { digits: "4951234567".into(), country: 1, picker: None };

        assert!(form.is_complete());
        assert_eq!(form.full_number(), "+375 495 123 45 67");
    }

    #[test]
    fn out_of_range_country_falls_back_to_default() {
        let form = PhoneForm { country: 99, ..PhoneForm::default() };
        assert_eq!(form.country().code, "RU");
    }
}
