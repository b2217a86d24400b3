//! Countries accepted on the phone screen.

/// A selectable dialling country.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code.
    pub code: &'static str,
    /// Display name (Russian).
    pub name: &'static str,
    /// International dialling prefix, including the leading `+`.
    pub prefix: &'static str,
    /// Flag emoji.
    pub flag: &'static str,
}

/// Supported countries. The first entry is the default selection.
pub static COUNTRIES: [Country; 10] = [
    Country { code: "RU", name: "Россия", prefix: "+7", flag: "🇷🇺" },
    Country { code: "BY", name: "Беларусь", prefix: "+375", flag: "🇧🇾" },
    Country { code: "AZ", name: "Азербайджан", prefix: "+994", flag: "🇦🇿" },
    Country { code: "AM", name: "Армения", prefix: "+374", flag: "🇦🇲" },
    Country { code: "KZ", name: "Казахстан", prefix: "+7", flag: "🇰🇿" },
    Country { code: "KG", name: "Кыргызстан", prefix: "+996", flag: "🇰🇬" },
    Country { code: "MD", name: "Молдова", prefix: "+373", flag: "🇲🇩" },
    Country { code: "TJ", name: "Таджикистан", prefix: "+992", flag: "🇹🇯" },
    Country { code: "UZ", name: "Узбекистан", prefix: "+998", flag: "🇺🇿" },
    Country { code: "GE", name: "Грузия", prefix: "+995", flag: "🇬🇪" },
];
