//! Keyword enums shared by configuration, CLI flags and environment variables

/// Implements `VARIANTS`, `as_str`, `Display` and case-insensitive `FromStr`
/// for a fieldless enum spelled as lowercase keywords.
macro_rules! keyword_enum {
    ($ty:ty, $what:literal, { $($text:literal => $variant:path),+ $(,)? }) => {
        impl $ty {
            pub const VARIANTS: &'static [&'static str] = &[$($text),+];

            pub fn as_str(&self) -> &'static str {
                match *self {
                    $($variant => $text,)+
                }
            }
        }

        impl ::std::fmt::Display for $ty {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl ::std::str::FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($variant),)+
                    other => Err(format!(
                        "unknown {} '{}', expected one of: {}",
                        $what,
                        other,
                        Self::VARIANTS.join(", ")
                    )),
                }
            }
        }
    };
}
