//! Keyboard keys and their textual names.
//!
//! Parsing accepts single letters and digits (`"A"`, `"7"`), the usual
//! abbreviations (`"Ctrl"`, `"PgUp"`, `"Del"`), and any variant name or legacy
//! alias, all case-insensitively.

use std::fmt;
use std::str::FromStr;

use horizon_values_core::{ConvertibleEnum, convert_debug};
use horizon_values_macros::ConvertibleEnum;

use crate::error::{Error, Result};

/// A key on a keyboard or gamepad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, ConvertibleEnum)]
#[repr(u8)]
pub enum Key {
    #[default]
    None = 0,
    #[convert(alias = "Back")]
    Backspace = 1,
    Tab = 2,
    #[convert(alias = "Return")]
    Enter = 3,
    Pause = 4,
    CapsLock = 5,
    Escape = 6,
    Space = 7,
    #[convert(alias = "Prior")]
    PageUp = 8,
    #[convert(alias = "Next")]
    PageDown = 9,
    End = 10,
    Home = 11,
    #[convert(alias = "Left")]
    LeftArrow = 12,
    #[convert(alias = "Up")]
    UpArrow = 13,
    #[convert(alias = "Right")]
    RightArrow = 14,
    #[convert(alias = "Down")]
    DownArrow = 15,
    PrintScreen = 16,
    Insert = 17,
    Delete = 18,
    D0 = 19,
    D1,
    D2,
    D3,
    D4,
    D5,
    D6,
    D7,
    D8,
    D9,
    A = 29,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    NumPad0 = 55,
    NumPad1,
    NumPad2,
    NumPad3,
    NumPad4,
    NumPad5,
    NumPad6,
    NumPad7,
    NumPad8,
    NumPad9,
    NumPadStar = 65,
    NumPadPlus,
    NumPadMinus,
    NumPadDot,
    NumPadSlash,
    F1 = 70,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    F21,
    F22,
    F23,
    F24,
    NumLock = 94,
    ScrollLock,
    BrowserBack = 96,
    BrowserForward,
    BrowserRefresh,
    BrowserStop,
    BrowserSearch,
    BrowserFavorites,
    BrowserHome,
    VolumeMute = 103,
    VolumeDown,
    VolumeUp,
    MediaNextTrack = 106,
    MediaPreviousTrack,
    MediaStop,
    MediaPlayPause,
    LaunchMail = 110,
    SelectMedia,
    LaunchApplication1,
    LaunchApplication2,
    Semicolon = 114,
    Equals,
    Comma,
    Minus,
    #[convert(alias = "OemPeriod")]
    Period,
    Slash,
    #[convert(alias = "OemOpenBrackets")]
    OpenBracket,
    #[convert(alias = "OemCloseBrackets")]
    CloseBracket,
    Quote,
    Backslash,
    Clear,
    Backtick = 125,
    Shift = 126,
    Control,
    Alt,
    MacCommand,
    MacOption,
    MacControl,
    Windows,
    Menu = 133,
    ExclamationMark = 134,
    QuotationMark,
    NumberSign,
    DollarSign,
    PercentSign,
    Ampersand,
    LeftParenthesis,
    RightParenthesis,
    Asterisk,
    PlusSign,
    Colon,
    LessThanSign,
    GreaterThanSign,
    QuestionMark,
    CommercialAt,
    CircumflexAccent,
    LowLine,
    LeftCurlyBracket,
    #[convert(alias = "OemPipe")]
    VerticalLine,
    RightCurlyBracket,
    Tilde = 154,
    GamepadA = 155,
    GamepadB,
    GamepadX,
    GamepadY,
    GamepadRightShoulder,
    GamepadLeftShoulder,
    GamepadLeftTrigger,
    GamepadRightTrigger,
    GamepadDPadUp,
    GamepadDPadDown,
    GamepadDPadLeft,
    GamepadDPadRight,
    GamepadMenu,
    GamepadView,
    GamepadLeftThumbstickButton,
    GamepadRightThumbstickButton,
    GamepadLeftThumbstickUp,
    GamepadLeftThumbstickDown,
    GamepadLeftThumbstickRight,
    GamepadLeftThumbstickLeft,
    GamepadRightThumbstickUp,
    GamepadRightThumbstickDown,
    GamepadRightThumbstickRight,
    GamepadRightThumbstickLeft = 178,
    #[convert(alias = "Hangul")]
    Kana = 179,
    Junja,
    Final,
    #[convert(alias = "Kanji")]
    Hanja,
    Convert,
    NonConvert,
    Accept,
    ModeChange,
    Select,
    Execute,
    Snapshot,
    Sleep = 190,
    NavigationView = 191,
    NavigationMenu,
    NavigationUp,
    NavigationDown,
    NavigationLeft,
    NavigationRight,
    NavigationAccept,
    NavigationCancel = 198,
}

/// Upper-cased abbreviations tried before variant names.
const ALIASES: &[(&str, Key)] = &[
    ("ENTER", Key::Enter),
    ("ESC", Key::Escape),
    ("PGUP", Key::PageUp),
    ("PGDN", Key::PageDown),
    ("PRTSC", Key::PrintScreen),
    ("INS", Key::Insert),
    ("DEL", Key::Delete),
    ("WIN", Key::Windows),
    ("WINDOWS", Key::Windows),
    ("LEFTWINDOWS", Key::Windows),
    ("RIGHTWINDOWS", Key::Windows),
    ("APPS", Key::Menu),
    ("APPLICATION", Key::Menu),
    ("BREAK", Key::Pause),
    ("BKSP", Key::Backspace),
    ("BKSPC", Key::Backspace),
    ("BACKSPACE", Key::Backspace),
    ("SHIFT", Key::Shift),
    ("LEFTSHIFT", Key::Shift),
    ("RIGHTSHIFT", Key::Shift),
    ("CTRL", Key::Control),
    ("CONTROL", Key::Control),
    ("LEFTCTRL", Key::Control),
    ("RIGHTCTRL", Key::Control),
    ("ALT", Key::Alt),
    ("LEFTALT", Key::Alt),
    ("RIGHTALT", Key::Alt),
    ("SEMICOLON", Key::Semicolon),
    ("PLUS", Key::PlusSign),
    ("COMMA", Key::Comma),
    ("MINUS", Key::Minus),
    ("PERIOD", Key::Period),
    ("QUESTION", Key::QuestionMark),
    ("TILDE", Key::Tilde),
    ("LEFTBRACKET", Key::OpenBracket),
    ("PIPE", Key::VerticalLine),
    ("RIGHTBRACKET", Key::CloseBracket),
    ("QUOTES", Key::Quote),
    ("BACKSLASH", Key::Backslash),
];

impl Key {
    /// Last key that may appear in a [`KeyGesture`](super::KeyGesture).
    pub const MAX_GESTURE_KEY: Key = Key::Menu;

    /// The key for an ASCII letter or digit.
    pub fn from_char(c: char) -> Option<Key> {
        let offset = if c.is_ascii_digit() {
            Key::D0.to_value() + (c as u8 - b'0') as i64
        } else if c.is_ascii_alphabetic() {
            Key::A.to_value() + (c.to_ascii_uppercase() as u8 - b'A') as i64
        } else {
            return None;
        };
        Key::from_value(offset)
    }

    /// The character of a letter or digit key.
    pub fn as_char(self) -> Option<char> {
        let value = self as u8;
        if (Key::D0 as u8..=Key::D9 as u8).contains(&value) {
            Some((b'0' + value - Key::D0 as u8) as char)
        } else if (Key::A as u8..=Key::Z as u8).contains(&value) {
            Some((b'A' + value - Key::A as u8) as char)
        } else {
            None
        }
    }

    /// Returns true for keys that may appear in a key gesture.
    pub fn is_gesture_key(self) -> bool {
        self <= Self::MAX_GESTURE_KEY
    }
}

impl FromStr for Key {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        let token = text.trim();
        if token.is_empty() {
            return Ok(Key::None);
        }

        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next())
            && let Some(key) = Key::from_char(c)
        {
            return Ok(key);
        }

        let upper = token.to_uppercase();
        if let Some((_, key)) = ALIASES.iter().find(|(alias, _)| *alias == upper) {
            return Ok(*key);
        }

        Key::from_name(token).ok_or_else(|| {
            convert_debug!(token = %upper, "unknown key token");
            Error::not_supported(format!("'{upper}' is not a recognized key"))
        })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Key::None {
            return Ok(());
        }
        match self.as_char() {
            Some(c) => write!(f, "{c}"),
            None => f.write_str(self.name()),
        }
    }
}
