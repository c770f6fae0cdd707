//! File (a-h)

/// File a (queenside) to h (kingside)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum File {
    FileA = 0,
    FileB = 1,
    FileC = 2,
    FileD = 3,
    FileE = 4,
    FileF = 5,
    FileG = 6,
    FileH = 7,
}

impl File {
    /// Number of files
    pub const NUM: usize = 8;

    /// All files, a first
    pub const ALL: [File; 8] = [
        File::FileA,
        File::FileB,
        File::FileC,
        File::FileD,
        File::FileE,
        File::FileF,
        File::FileG,
        File::FileH,
    ];

    /// Convert from 0-based index
    #[inline]
    pub const fn from_u8(n: u8) -> Option<File> {
        if (n as usize) < File::NUM {
            Some(File::ALL[n as usize])
        } else {
            None
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Letter 'a'-'h'
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }

    /// Parse a lowercase file letter
    #[inline]
    pub const fn from_char(c: char) -> Option<File> {
        if c.is_ascii_lowercase() {
            File::from_u8(c as u8 - b'a')
        } else {
            None
        }
    }

    /// File shifted by `delta`, if still on the board
    #[inline]
    pub const fn offset(self, delta: i8) -> Option<File> {
        let n = self as i8 + delta;
        if n < 0 { None } else { File::from_u8(n as u8) }
    }

    /// Absolute distance between two files
    #[inline]
    pub const fn distance(self, other: File) -> u8 {
        (self as u8).abs_diff(other as u8)
    }
}
