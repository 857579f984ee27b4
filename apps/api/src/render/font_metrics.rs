//! Static font-metric tables for the two PDF base-14 faces the renderer uses.
//!
//! Character widths are in em units (relative to font size), taken from the
//! Adobe Helvetica / Helvetica-Bold AFM files. Because the renderer ASCII-folds
//! its input, the tables only cover ASCII 0x20..=0x7E (95 printable characters).
//! Index = (char as usize) - 32.

/// Millimetres → PDF points.
pub const PT_PER_MM: f32 = 72.0 / 25.4;

// ────────────────────────────────────────────────────────────────────────────
// Font style enum
// ────────────────────────────────────────────────────────────────────────────

/// The two faces the document renderer switches between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Body text.
    Regular,
    /// Headings.
    Bold,
}

impl FontStyle {
    /// PostScript name of the base-14 font backing this style.
    pub fn base_font(self) -> &'static str {
        match self {
            FontStyle::Regular => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font style.
///
/// `widths[i]` = width of ASCII character `(i + 32)` at 1em.
///
/// Width array slot layout:
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
    widths: [f32; 95],
    /// Fallback width for anything outside the printable ASCII range (tabs, control chars).
    pub average_char_width: f32,
    pub space_width: f32,
}

impl FontMetricTable {
    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars()
            .map(|c| {
                let code = c as usize;
                if (32..=126).contains(&code) {
                    self.widths[code - 32]
                } else {
                    self.average_char_width
                }
            })
            .sum()
    }

    /// Width of `s` in millimetres when set at `size_pt`.
    pub fn width_mm(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt / PT_PER_MM
    }

    /// Greedy word-wrap of `s` into lines no wider than `max_width_mm`.
    ///
    /// Spacing is kept as written: the first line keeps its leading indentation
    /// and runs of spaces between words survive. Tabs expand to
    /// `TAB_WIDTH_SPACES` spaces. Lines only break at whitespace, and the run a
    /// break falls on is dropped. A word that is wider than the whole line is
    /// broken between characters. Returns an empty vector for whitespace-only input.
    pub fn wrap(&self, s: &str, size_pt: f32, max_width_mm: f32) -> Vec<String> {
        let expanded = expand_whitespace(s);
        let mut lines = Vec::new();
        if expanded.trim().is_empty() {
            return lines;
        }

        let mut current = String::new();
        let mut current_width = 0.0_f32;
        let mut has_text = false;
        let mut pending_space = "";

        for (is_space, run) in split_runs(&expanded) {
            if is_space {
                if has_text {
                    pending_space = run;
                } else if lines.is_empty() {
                    // Leading indentation of the first visual line.
                    current.push_str(run);
                    current_width += self.width_mm(run, size_pt);
                }
                continue;
            }

            let gap = std::mem::take(&mut pending_space);
            let word_w = self.width_mm(run, size_pt);
            let gap_w = self.width_mm(gap, size_pt);

            if current_width + gap_w + word_w <= max_width_mm {
                current.push_str(gap);
                current.push_str(run);
                current_width += gap_w + word_w;
            } else {
                if has_text {
                    lines.push(std::mem::take(&mut current));
                }
                current.clear();
                if word_w > max_width_mm {
                    let (mut pieces, tail) = self.break_word(run, size_pt, max_width_mm);
                    lines.append(&mut pieces);
                    current_width = self.width_mm(&tail, size_pt);
                    current = tail;
                } else {
                    current.push_str(run);
                    current_width = word_w;
                }
            }
            has_text = true;
        }

        if has_text {
            lines.push(current);
        }
        lines
    }

    /// Splits an over-long word into full-width pieces plus the trailing remainder.
    fn break_word(&self, word: &str, size_pt: f32, max_width_mm: f32) -> (Vec<String>, String) {
        let mut pieces = Vec::new();
        let mut piece = String::new();
        let mut piece_width = 0.0_f32;

        for c in word.chars() {
            let mut buf = [0u8; 4];
            let char_w = self.width_mm(c.encode_utf8(&mut buf), size_pt);
            // Always place at least one character per piece.
            if !piece.is_empty() && piece_width + char_w > max_width_mm {
                pieces.push(std::mem::take(&mut piece));
                piece_width = 0.0;
            }
            piece.push(c);
            piece_width += char_w;
        }
        (pieces, piece)
    }
}

/// Tab stops are rendered as this many spaces.
pub const TAB_WIDTH_SPACES: usize = 4;

/// Expands tabs and turns every other whitespace character into a plain space,
/// so the output only ever shows glyphs the font can draw.
fn expand_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\t' => out.extend(std::iter::repeat(' ').take(TAB_WIDTH_SPACES)),
            c if c.is_whitespace() => out.push(' '),
            c => out.push(c),
        }
    }
    out
}

/// Splits `s` into maximal runs of spaces and non-spaces, in order.
fn split_runs(s: &str) -> Vec<(bool, &str)> {
    let mut runs = Vec::new();
    let mut start = 0;
    let mut in_space: Option<bool> = None;
    for (i, c) in s.char_indices() {
        let is_space = c == ' ';
        if let Some(prev) = in_space {
            if prev != is_space {
                runs.push((prev, &s[start..i]));
                start = i;
            }
        }
        in_space = Some(is_space);
    }
    if let Some(prev) = in_space {
        runs.push((prev, &s[start..]));
    }
    runs
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables  (95 ASCII printable characters each)
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~
        0.334, 0.260, 0.334, 0.584,
    ],
    average_char_width: 0.513,
    space_width: 0.278,
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~
        0.389, 0.280, 0.389, 0.584,
    ],
    average_char_width: 0.549,
    space_width: 0.278,
};

/// Returns the static metric table for the given style.
pub fn get_metrics(style: FontStyle) -> &'static FontMetricTable {
    match style {
        FontStyle::Regular => &HELVETICA_TABLE,
        FontStyle::Bold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
