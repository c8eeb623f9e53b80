//! Canonical key codes and the evdev key code table
//!
//! [`KeyCode`] is the backend-independent key identifier handed to the host
//! library (printable keys use their ASCII value, keypad/navigation/
//! function/modifier keys live above 255). [`LINUX_KEYMAP`] translates
//! Linux input event codes from <linux/input-event-codes.h>.

/// Backend-independent key identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u16)]
pub enum KeyCode {
    #[default]
    Unknown = 0,

    // ASCII control keys
    Backspace = 8,
    Tab = 9,
    Linefeed = 10,
    Clear = 12,
    Return = 13,
    Pause = 19,
    Escape = 27,

    // Printable ASCII
    Space = 32,
    Exclaim = 33,
    Quotedbl = 34,
    Hash = 35,
    Dollar = 36,
    Ampersand = 38,
    Quote = 39,
    LeftParen = 40,
    RightParen = 41,
    Asterisk = 42,
    Plus = 43,
    Comma = 44,
    Minus = 45,
    Period = 46,
    Slash = 47,
    Num0 = 48,
    Num1 = 49,
    Num2 = 50,
    Num3 = 51,
    Num4 = 52,
    Num5 = 53,
    Num6 = 54,
    Num7 = 55,
    Num8 = 56,
    Num9 = 57,
    Colon = 58,
    Semicolon = 59,
    Less = 60,
    Equals = 61,
    Greater = 62,
    Question = 63,
    At = 64,
    LeftBracket = 91,
    Backslash = 92,
    RightBracket = 93,
    Caret = 94,
    Underscore = 95,
    Backquote = 96,
    A = 97,
    B = 98,
    C = 99,
    D = 100,
    E = 101,
    F = 102,
    G = 103,
    H = 104,
    I = 105,
    J = 106,
    K = 107,
    L = 108,
    M = 109,
    N = 110,
    O = 111,
    P = 112,
    Q = 113,
    R = 114,
    S = 115,
    T = 116,
    U = 117,
    V = 118,
    W = 119,
    X = 120,
    Y = 121,
    Z = 122,
    Delete = 127,

    // Keypad
    Kp0 = 256,
    Kp1 = 257,
    Kp2 = 258,
    Kp3 = 259,
    Kp4 = 260,
    Kp5 = 261,
    Kp6 = 262,
    Kp7 = 263,
    Kp8 = 264,
    Kp9 = 265,
    KpPeriod = 266,
    KpDivide = 267,
    KpMultiply = 268,
    KpMinus = 269,
    KpPlus = 270,
    KpEnter = 271,
    KpEquals = 272,

    // Navigation
    Up = 273,
    Down = 274,
    Right = 275,
    Left = 276,
    Insert = 277,
    Home = 278,
    End = 279,
    PageUp = 280,
    PageDown = 281,

    // Function keys
    F1 = 282,
    F2 = 283,
    F3 = 284,
    F4 = 285,
    F5 = 286,
    F6 = 287,
    F7 = 288,
    F8 = 289,
    F9 = 290,
    F10 = 291,
    F11 = 292,
    F12 = 293,
    F13 = 294,
    F14 = 295,
    F15 = 296,

    // Modifiers
    NumLock = 300,
    CapsLock = 301,
    ScrollLock = 302,
    RShift = 303,
    LShift = 304,
    RCtrl = 305,
    LCtrl = 306,
    RAlt = 307,
    LAlt = 308,
    RMeta = 309,
    LMeta = 310,
    LSuper = 311,
    RSuper = 312,
    Mode = 313,
    Compose = 314,

    // Misc
    Help = 315,
    Print = 316,
    SysReq = 317,
    Break = 318,
    Menu = 319,
    Power = 320,
    Euro = 321,
    Undo = 322,
}

impl KeyCode {
    /// Numeric value as seen by the host library
    pub const fn value(self) -> u16 {
        self as u16
    }

    /// Character produced by this key without modifiers, if printable
    pub fn as_char(self) -> Option<char> {
        let v = self.value();
        if (32..127).contains(&v) {
            char::from_u32(v as u32)
        } else {
            None
        }
    }
}

use KeyCode as K;

/// Number of entries in [`LINUX_KEYMAP`] (KEY_RESERVED..=KEY_MICMUTE)
pub const LINUX_KEYMAP_LEN: usize = 249;

/// Linux input event code → canonical key code, indexed by event code
pub static LINUX_KEYMAP: [KeyCode; LINUX_KEYMAP_LEN] = [
    // 0: KEY_RESERVED, KEY_ESC, number row
    K::Unknown,
    K::Escape,
    K::Num1,
    K::Num2,
    K::Num3,
    K::Num4,
    K::Num5,
    K::Num6,
    K::Num7,
    K::Num8,
    K::Num9,
    K::Num0,
    K::Minus,
    K::Equals,
    K::Backspace,
    K::Tab,
    // 16: top letter row
    K::Q,
    K::W,
    K::E,
    K::R,
    K::T,
    K::Y,
    K::U,
    K::I,
    K::O,
    K::P,
    K::LeftBracket,
    K::RightBracket,
    K::Return,
    K::LCtrl,
    // 30: home row
    K::A,
    K::S,
    K::D,
    K::F,
    K::G,
    K::H,
    K::J,
    K::K,
    K::L,
    K::Semicolon,
    K::Quote,
    K::Backquote,
    K::LShift,
    K::Backslash,
    // 44: bottom row
    K::Z,
    K::X,
    K::C,
    K::V,
    K::B,
    K::N,
    K::M,
    K::Comma,
    K::Period,
    K::Slash,
    K::RShift,
    K::KpMultiply,
    K::LAlt,
    K::Space,
    K::CapsLock,
    // 59: F1-F10
    K::F1,
    K::F2,
    K::F3,
    K::F4,
    K::F5,
    K::F6,
    K::F7,
    K::F8,
    K::F9,
    K::F10,
    K::NumLock,
    K::ScrollLock,
    // 71: keypad
    K::Kp7,
    K::Kp8,
    K::Kp9,
    K::KpMinus,
    K::Kp4,
    K::Kp5,
    K::Kp6,
    K::KpPlus,
    K::Kp1,
    K::Kp2,
    K::Kp3,
    K::Kp0,
    K::KpPeriod,
    K::Unknown, // 84: unassigned
    K::Unknown, // KEY_ZENKAKUHANKAKU
    K::Unknown, // KEY_102ND
    K::F11,
    K::F12,
    // 89: Japanese input keys
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    // 96
    K::KpEnter,
    K::RCtrl,
    K::KpDivide,
    K::SysReq,
    K::RAlt,
    K::Unknown, // KEY_LINEFEED
    // 102: navigation block
    K::Home,
    K::Up,
    K::PageUp,
    K::Left,
    K::Right,
    K::End,
    K::Down,
    K::PageDown,
    K::Insert,
    K::Delete,
    // 112: macro, volume
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Power,
    K::KpEquals,
    K::Unknown, // KEY_KPPLUSMINUS
    K::Pause,
    K::Unknown, // KEY_SCALE
    K::Unknown, // KEY_KPCOMMA
    K::Unknown, // KEY_HANGEUL
    K::Unknown, // KEY_HANJA
    K::Unknown, // KEY_YEN
    K::LSuper,
    K::RSuper,
    K::Compose,
    // 128: AC/AL application keys
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Undo,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Help,
    K::Menu,
    // 140
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    // 150
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    // 160: media keys
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    // 170
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    // 180
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::F13,
    K::F14,
    K::F15,
    // 186: F16-F24 have no canonical code
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    // 195: unassigned
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    // 200
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    // 210: KEY_PRINT
    K::Print,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    // 220
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    // 230
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    // 240
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown,
    K::Unknown, // 248: KEY_MICMUTE
];

/// Translate a Linux input event code. Codes past the table map to `Unknown`.
#[inline]
pub fn map_linux_key(code: u16) -> KeyCode {
    LINUX_KEYMAP
        .get(code as usize)
        .copied()
        .unwrap_or(KeyCode::Unknown)
}
