//! Static glyph-width table for the built-in PDF Helvetica font.
//!
//! Widths are in thousandths of an em, taken from the standard Helvetica AFM.
//! The table is indexed by Windows-1252 byte (0x20..=0xFF, index = byte - 32), so a
//! character is measured by the glyph the content stream actually draws. Only
//! characters with no WinAnsi byte use `average_char_width`; the encoding pass
//! rejects or replaces those before layout.

use crate::render::encoding::win_ansi_byte;

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Width table for one of the standard 14 PDF fonts.
///
/// Width array slot layout (ASCII part; slots 95.. follow bytes 0x7F..=0xFF):
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    /// PDF `/BaseFont` name.
    pub base_font: &'static str,
    widths: [u16; 224],
    pub average_char_width: u16,
}

impl FontMetricTable {
    fn char_units(&self, c: char) -> u16 {
        match win_ansi_byte(c) {
            Some(byte) => self.widths[usize::from(byte) - 32],
            None => self.average_char_width,
        }
    }

    /// Rendered width of `s` in points at `font_size_pt`.
    pub fn measure_str(&self, s: &str, font_size_pt: f32) -> f32 {
        let units: u32 = s.chars().map(|c| u32::from(self.char_units(c))).sum();
        units as f32 * font_size_pt / 1000.0
    }

    /// Greedy word-wrap of `text` to `max_width_pt`.
    ///
    /// Words are split on whitespace and rejoined with single spaces. A word wider
    /// than a full line is broken between characters. Blank input yields no lines.
    pub fn wrap_lines(&self, text: &str, font_size_pt: f32, max_width_pt: f32) -> Vec<String> {
        let space_w = self.measure_str(" ", font_size_pt);
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in text.split_whitespace() {
            let word_w = self.measure_str(word, font_size_pt);

            if !current.is_empty() && current_width + space_w + word_w <= max_width_pt {
                current.push(' ');
                current.push_str(word);
                current_width += space_w + word_w;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }

            if word_w <= max_width_pt {
                current.push_str(word);
                current_width = word_w;
                continue;
            }

            // Oversized word: hard-break it, keeping the tail open for the next word.
            for c in word.chars() {
                let c_w = self.measure_str(c.encode_utf8(&mut [0; 4]), font_size_pt);
                if !current.is_empty() && current_width + c_w > max_width_pt {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(c);
                current_width += c_w;
            }
        }

        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

/// Helvetica (regular), the body and title font of the question PDF.
pub static HELVETICA: FontMetricTable = FontMetricTable {
    base_font: "Helvetica",
    #[rustfmt::skip]
    widths: [
        // sp   !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0    1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :    ;    <    =    >    ?    @
        278, 278, 584, 584, 584, 556, 1015,
        // A    B    C    D    E    F    G    H    I    J    K    L    M
        667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
        // N    O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [    \    ]    ^    _    `
        278, 278, 278, 469, 556, 333,
        // a    b    c    d    e    f    g    h    i    j    k    l    m
        556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
        // n    o    p    q    r    s    t    u    v    w    x    y    z
        556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
        // {    |    }    ~    DEL
        334, 260, 334, 584, 556,
        // €    -    ‚    ƒ    „    …    †    ‡    ˆ    ‰    Š    ‹    Œ    -    Ž    -
        556, 556, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 556, 611, 556,
        // -    ‘    ’    “    ”    •    –    —    ˜    ™    š    ›    œ    -    ž    Ÿ
        556, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 556, 500, 667,
        // nbsp ¡    ¢    £    ¤    ¥    ¦    §    ¨    ©    ª    «    ¬    shy  ®    ¯
        278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
        // °    ±    ²    ³    ´    µ    ¶    ·    ¸    ¹    º    »    ¼    ½    ¾    ¿
        400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
        // À    Á    Â    Ã    Ä    Å    Æ    Ç    È    É    Ê    Ë    Ì    Í    Î    Ï
        667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
        // Ð    Ñ    Ò    Ó    Ô    Õ    Ö    ×    Ø    Ù    Ú    Û    Ü    Ý    Þ    ß
        722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
        // à    á    â    ã    ä    å    æ    ç    è    é    ê    ë    ì    í    î    ï
        556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
        // ð    ñ    ò    ó    ô    õ    ö    ÷    ø    ù    ú    û    ü    ý    þ    ÿ
        556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
    ],
    average_char_width: 556,
};

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
