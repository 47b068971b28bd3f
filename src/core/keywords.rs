use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static KEYWORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    // ASCII word boundaries: accented letters next to a keyword do not join it
    Regex::new(r"(?-u:\b)(deskripsi|url|kategori|gambar|nama_produk|waktu_pembuatan)(?-u:\b)")
        .expect("valid keyword pattern")
});

/// A recognized token in free text, each mapped to one field of the product document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Description,
    Url,
    Category,
    Image,
    ProductName,
    CreateTime,
}

impl Keyword {
    pub const ALL: [Keyword; 6] = [
        Keyword::Description,
        Keyword::Url,
        Keyword::Category,
        Keyword::Image,
        Keyword::ProductName,
        Keyword::CreateTime,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Description => "deskripsi",
            Keyword::Url => "url",
            Keyword::Category => "kategori",
            Keyword::Image => "gambar",
            Keyword::ProductName => "nama_produk",
            Keyword::CreateTime => "waktu_pembuatan",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == token)
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Every whole-word keyword in `text`, in order of appearance. Repeats are kept.
pub fn scan(text: &str) -> Vec<Keyword> {
    KEYWORD_PATTERN
        .find_iter(text)
        .filter_map(|m| Keyword::from_token(m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_in_order_with_repeats() {
        assert_eq!(
            scan("minta gambar dan deskripsi, lalu gambar lagi"),
            vec![Keyword::Image, Keyword::Description, Keyword::Image]
        );
    }

    #[test]
    fn test_scan_whole_words_only() {
        assert!(scan("urlnya mana? deskripsinya?").is_empty());
        assert_eq!(scan("nama_produk?"), vec![Keyword::ProductName]);
        assert_eq!(scan("(waktu_pembuatan)"), vec![Keyword::CreateTime]);
    }

    #[test]
    fn test_non_ascii_letters_are_boundaries() {
        assert_eq!(scan("éurl gambarñ"), vec![Keyword::Url, Keyword::Image]);
        assert!(scan("xurl gambar2").is_empty());
    }

    #[test]
    fn test_scan_is_case_sensitive() {
        assert!(scan("Deskripsi URL").is_empty());
    }

    #[test]
    fn test_no_keyword() {
        assert!(scan("halo bot").is_empty());
        assert!(scan("").is_empty());
    }

    #[test]
    fn test_token_round_trip_covers_all() {
        for keyword in Keyword::ALL {
            assert_eq!(Keyword::from_token(keyword.as_str()), Some(keyword));
        }
    }
}
