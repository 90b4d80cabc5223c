use chrono::{Days, Locale};

use crate::{
    DAYS_IN_WEEK, DEFAULT_LOCALE, LOCALE_TAG_SEPARATOR, POSIX_LOCALE_SEPARATOR, REFERENCE_SUNDAY,
    WEEKDAY_FORMAT,
};

/// Abbreviated weekday names for `locale`, Sunday first.
///
/// `locale` is a BCP 47 style tag such as `en-US`, `fr-fr` or `ja`, matched
/// without regard to case. Tags we have no data for fall back to `en-US`.
pub fn week_days(locale: &str) -> [String; DAYS_IN_WEEK] {
    let locale = resolve_locale(locale);
    std::array::from_fn(|offset| {
        (REFERENCE_SUNDAY + Days::new(offset as u64))
            .format_localized(WEEKDAY_FORMAT, locale)
            .to_string()
    })
}

/// [`week_days`] in the default locale
pub fn week_days_default() -> [String; DAYS_IN_WEEK] {
    week_days(DEFAULT_LOCALE)
}

/// Home region for a bare language tag
const DEFAULT_REGIONS: &[(&str, &str)] = &[
    ("ar", "SA"),
    ("cs", "CZ"),
    ("da", "DK"),
    ("de", "DE"),
    ("el", "GR"),
    ("en", "US"),
    ("es", "ES"),
    ("fa", "IR"),
    ("fi", "FI"),
    ("fr", "FR"),
    ("he", "IL"),
    ("hi", "IN"),
    ("hu", "HU"),
    ("id", "ID"),
    ("it", "IT"),
    ("ja", "JP"),
    ("ko", "KR"),
    ("ms", "MY"),
    ("nb", "NO"),
    ("nl", "NL"),
    ("pl", "PL"),
    ("pt", "BR"),
    ("ro", "RO"),
    ("ru", "RU"),
    ("sv", "SE"),
    ("th", "TH"),
    ("tr", "TR"),
    ("uk", "UA"),
    ("vi", "VN"),
    ("zh", "CN"),
];

/// Subtags of a BCP 47 tag in canonical case
struct LocaleTag {
    language: String,
    script:   Option<String>,
    region:   Option<String>,
}

impl LocaleTag {
    /// Splits on `-` or `_`; language lower-case, script title-case, region upper-case
    fn parse(tag: &str) -> Option<Self> {
        let mut subtags = tag
            .trim()
            .split([LOCALE_TAG_SEPARATOR, POSIX_LOCALE_SEPARATOR])
            .filter(|s| !s.is_empty());

        let language = subtags.next()?.to_ascii_lowercase();
        if !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }

        let mut script = None;
        let mut region = None;
        for subtag in subtags.filter(|s| s.chars().all(|c| c.is_ascii_alphanumeric())) {
            match subtag.len() {
                4 if script.is_none() && region.is_none() => {
                    let (head, tail) = subtag.split_at(1);
                    script = Some(format!("{}{}", head.to_ascii_uppercase(), tail.to_ascii_lowercase()));
                },
                2 | 3 if region.is_none() => region = Some(subtag.to_ascii_uppercase()),
                _ => {},
            }
        }

        Some(Self {
            language,
            script,
            region,
        })
    }

    /// POSIX names to try, most specific first
    fn candidates(&self) -> Vec<String> {
        let sep = POSIX_LOCALE_SEPARATOR;
        let lang = &self.language;
        let mut names = Vec::new();

        if let Some(region) = &self.region {
            if let Some(script) = &self.script {
                names.push(format!("{lang}{sep}{region}{sep}{}", script.to_ascii_lowercase()));
            }
            names.push(format!("{lang}{sep}{region}"));
        }

        if let Some((_, region)) = DEFAULT_REGIONS.iter().find(|(l, _)| *l == lang.as_str()) {
            names.push(format!("{lang}{sep}{region}"));
        }
        names.push(format!("{lang}{sep}{}", lang.to_ascii_uppercase()));
        names.push(lang.clone());
        names
    }
}

fn resolve_locale(tag: &str) -> Locale {
    if let Some(locale) = LocaleTag::parse(tag).and_then(|parsed| {
        parsed.candidates().iter().find_map(|name| lookup(name))
    }) {
        return locale;
    }

    tracing::warn!(locale = tag, fallback = DEFAULT_LOCALE, "unknown locale");
    Locale::en_US
}

fn lookup(name: &str) -> Option<Locale> {
    Locale::try_from(name).ok()
}
