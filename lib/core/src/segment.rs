//! Vietnamese word segmentation
//!
//! Vietnamese writes every syllable as a separate space-delimited unit, so a
//! single word such as "điện thoại" (phone) spans two whitespace tokens.
//! The segmenter reunites such syllables with a greedy forward longest-match
//! against a [`Lexicon`] and joins them with `_`, the same output contract
//! used by the common Vietnamese tokenizers (`điện thoại` -> `điện_thoại`).

use crate::error::{Error, Result};
use ahash::AHashSet;
use std::io::BufRead;
use std::path::Path;
use unicode_normalization::UnicodeNormalization;

/// Separator placed between the syllables of a segmented word
pub const SYLLABLE_JOINER: char = '_';

/// Built-in compounds, biased toward retail and apparel catalogs
const BUILTIN_WORDS: &[&str] = &[
    // shop and catalog vocabulary
    "sản phẩm", "thương hiệu", "chính hãng", "cao cấp", "giá rẻ", "giảm giá",
    "khuyến mãi", "mua sắm", "cửa hàng", "giao hàng", "bảo hành", "đánh giá",
    "mô tả", "từ khóa", "hình ảnh", "chất lượng", "chất liệu", "thiết kế",
    "công nghệ", "hỗ trợ", "bảo vệ", "độ bền", "kích thước", "kích cỡ",
    "màu sắc", "phiên bản", "giới hạn", "phiên bản giới hạn", "hàng hiệu",
    // footwear
    "giày thể thao", "giày chạy bộ", "giày da", "giày cao gót", "cao gót",
    "giày lười", "giày búp bê", "dép lê", "đế giày", "dây giày", "đệm khí",
    "ôm chân", "êm ái", "chống trơn", "chống trượt",
    // apparel
    "quần áo", "áo khoác", "áo thun", "áo sơ mi", "sơ mi", "áo polo", "áo len",
    "áo gió", "áo hoodie", "áo ba lỗ", "quần short", "quần jean", "quần dài",
    "quần jogger", "quần tây", "váy liền", "cổ tròn", "cổ bẻ", "tay ngắn",
    "tay dài", "dáng rộng", "ống rộng", "ống đứng", "co giãn", "thấm hút",
    "mồ hôi", "thoáng khí", "giữ ấm", "chống gió", "chống nắng", "chống nước",
    "lông vũ", "họa tiết", "in hình",
    // accessories
    "túi xách", "ba lô", "túi đeo chéo", "đồng hồ", "kính mát", "mũ lưỡi trai",
    "thắt lưng", "dây lưng", "ví da", "nước hoa", "mỹ phẩm", "trang sức",
    "vòng tay", "khẩu trang", "phụ kiện", "điện thoại", "máy tính",
    // activities and occasions
    "thể thao", "chạy bộ", "tập luyện", "thể dục", "thể hình", "phòng tập",
    "bóng đá", "bóng rổ", "quần vợt", "cầu lông", "leo núi", "đi bộ",
    "dạo phố", "du lịch", "dã ngoại", "ngoài trời", "trong nhà", "văn phòng",
    "công sở", "đường phố", "hàng ngày", "hằng ngày", "mùa hè", "mùa đông",
    "mùa xuân", "mùa thu",
    // style
    "thời trang", "phong cách", "năng động", "trẻ trung", "sang trọng",
    "lịch sự", "cổ điển", "hiện đại", "đơn giản", "tinh tế", "cá tính",
    "nổi bật", "thoải mái", "nhẹ nhàng", "bền bỉ", "siêu nhẹ", "cao su",
    // colours
    "màu đen", "màu trắng", "màu đỏ", "màu xanh", "màu vàng", "màu xám",
    "màu hồng", "màu nâu", "xanh dương", "xanh lá", "xanh navy",
    // people
    "nam giới", "nữ giới", "trẻ em", "người lớn", "học sinh", "sinh viên",
    "phụ nữ", "đàn ông", "bạn bè", "chúng tôi", "tất cả",
];

fn canonical_syllables(word: &str) -> Vec<String> {
    word.nfc()
        .collect::<String>()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == SYLLABLE_JOINER)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// A set of multi-syllable words keyed by their space-joined syllables
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    words: AHashSet<String>,
    max_syllables: usize,
}

impl Lexicon {
    /// An empty lexicon; segmentation with it leaves every syllable alone
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The compiled-in compound list
    #[must_use]
    pub fn builtin() -> Self {
        let mut lexicon = Self::new();
        for word in BUILTIN_WORDS {
            lexicon.insert(word);
        }
        lexicon
    }

    /// Add a word. Single-syllable entries are ignored since they never join anything.
    pub fn insert(&mut self, word: &str) -> bool {
        let syllables = canonical_syllables(word);
        if syllables.len() < 2 {
            return false;
        }
        self.max_syllables = self.max_syllables.max(syllables.len());
        self.words.insert(syllables.join(" "))
    }

    /// Read one word per line; `#` starts a comment line
    pub fn extend_from_reader<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut added = 0;
        for line in reader.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if self.insert(line) {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Extend with a word-list file
    pub fn extend_from_path<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| Error::Dictionary(format!("{}: {}", path.display(), e)))?;
        self.extend_from_reader(std::io::BufReader::new(file))
    }

    #[must_use]
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&canonical_syllables(word).join(" "))
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn max_syllables(&self) -> usize {
        self.max_syllables
    }
}

/// Greedy longest-match segmenter
#[derive(Debug, Clone)]
pub struct Segmenter {
    lexicon: Lexicon,
}

impl Segmenter {
    #[must_use]
    pub fn new(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    #[must_use]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Segment text into word tokens.
    ///
    /// Input is expected to be lowercase already. Existing `_` joins are
    /// split back into syllables first, so segmenting the output again
    /// yields the same tokens.
    pub fn segment(&self, text: &str) -> Vec<String> {
        let syllables: Vec<&str> = text
            .split(|c: char| c.is_whitespace() || c == SYLLABLE_JOINER)
            .filter(|s| !s.is_empty())
            .collect();

        let mut tokens = Vec::with_capacity(syllables.len());
        let mut pos = 0;
        let mut candidate = String::new();
        let joiner = SYLLABLE_JOINER.to_string();

        while pos < syllables.len() {
            let longest = self.lexicon.max_syllables.min(syllables.len() - pos);
            let mut matched = 1;

            for len in (2..=longest).rev() {
                candidate.clear();
                for (i, syllable) in syllables[pos..pos + len].iter().enumerate() {
                    if i > 0 {
                        candidate.push(' ');
                    }
                    candidate.push_str(syllable);
                }
                if self.lexicon.words.contains(candidate.as_str()) {
                    matched = len;
                    break;
                }
            }

            tokens.push(syllables[pos..pos + matched].join(&joiner));
            pos += matched;
        }

        tokens
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new(Lexicon::builtin())
    }
}
