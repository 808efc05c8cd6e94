#![forbid(unsafe_code)]

pub mod matching;
pub mod normalize;
pub mod stats;

pub mod model {
    /// A raw catalog line reduced to its canonical identity.
    ///
    /// `name` is the dedup key (typically a former filename stem); `clean_name`
    /// is the display form with separator characters replaced by spaces.
    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct NormalizedName {
        pub name: String,
        pub clean_name: String,
    }

    /// Display form used everywhere a design is shown or matched: the clean
    /// name when present, otherwise the raw name.
    pub fn display_name<'a>(name: &'a str, clean_name: &'a str) -> &'a str {
        if clean_name.is_empty() { name } else { clean_name }
    }
}
