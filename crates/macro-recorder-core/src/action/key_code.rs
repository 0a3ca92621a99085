use std::fmt;

/// Logical keyboard key, independent of the listening and synthesis backends.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Printable character key (letters lowercase, digits, punctuation).
    Char(char),
    /// Function key `F1`..`F12`.
    Function(u8),
    /// Enter / Return.
    Enter,
    /// Space bar.
    Space,
    /// Tab.
    Tab,
    /// Escape.
    Escape,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Either shift key.
    Shift,
    /// Either control key.
    Control,
    /// Either alt key (including AltGr).
    Alt,
    /// Either meta / command / windows key.
    Meta,
    /// Caps lock.
    CapsLock,
    /// A key the synthesizer has no mapping for; kept for display only.
    Unmapped(String),
}

impl KeyCode {
    /// Whether this key can be replayed.
    pub fn is_mapped(&self) -> bool {
        !matches!(self, KeyCode::Unmapped(_))
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyCode::Char(c) => write!(f, "'{}'", c),
            KeyCode::Function(n) => write!(f, "F{}", n),
            KeyCode::Unmapped(name) => write!(f, "<{}>", name),
            other => write!(f, "{:?}", other),
        }
    }
}

impl From<rdev::Key> for KeyCode {
    fn from(key: rdev::Key) -> Self {
        use rdev::Key;

        match key {
            Key::KeyA => KeyCode::Char('a'),
            Key::KeyB => KeyCode::Char('b'),
            Key::KeyC => KeyCode::Char('c'),
            Key::KeyD => KeyCode::Char('d'),
            Key::KeyE => KeyCode::Char('e'),
            Key::KeyF => KeyCode::Char('f'),
            Key::KeyG => KeyCode::Char('g'),
            Key::KeyH => KeyCode::Char('h'),
            Key::KeyI => KeyCode::Char('i'),
            Key::KeyJ => KeyCode::Char('j'),
            Key::KeyK => KeyCode::Char('k'),
            Key::KeyL => KeyCode::Char('l'),
            Key::KeyM => KeyCode::Char('m'),
            Key::KeyN => KeyCode::Char('n'),
            Key::KeyO => KeyCode::Char('o'),
            Key::KeyP => KeyCode::Char('p'),
            Key::KeyQ => KeyCode::Char('q'),
            Key::KeyR => KeyCode::Char('r'),
            Key::KeyS => KeyCode::Char('s'),
            Key::KeyT => KeyCode::Char('t'),
            Key::KeyU => KeyCode::Char('u'),
            Key::KeyV => KeyCode::Char('v'),
            Key::KeyW => KeyCode::Char('w'),
            Key::KeyX => KeyCode::Char('x'),
            Key::KeyY => KeyCode::Char('y'),
            Key::KeyZ => KeyCode::Char('z'),

            Key::Num0 => KeyCode::Char('0'),
            Key::Num1 => KeyCode::Char('1'),
            Key::Num2 => KeyCode::Char('2'),
            Key::Num3 => KeyCode::Char('3'),
            Key::Num4 => KeyCode::Char('4'),
            Key::Num5 => KeyCode::Char('5'),
            Key::Num6 => KeyCode::Char('6'),
            Key::Num7 => KeyCode::Char('7'),
            Key::Num8 => KeyCode::Char('8'),
            Key::Num9 => KeyCode::Char('9'),

            Key::BackQuote => KeyCode::Char('`'),
            Key::Minus => KeyCode::Char('-'),
            Key::Equal => KeyCode::Char('='),
            Key::LeftBracket => KeyCode::Char('['),
            Key::RightBracket => KeyCode::Char(']'),
            Key::SemiColon => KeyCode::Char(';'),
            Key::Quote => KeyCode::Char('\''),
            Key::BackSlash => KeyCode::Char('\\'),
            Key::Comma => KeyCode::Char(','),
            Key::Dot => KeyCode::Char('.'),
            Key::Slash => KeyCode::Char('/'),

            Key::F1 => KeyCode::Function(1),
            Key::F2 => KeyCode::Function(2),
            Key::F3 => KeyCode::Function(3),
            Key::F4 => KeyCode::Function(4),
            Key::F5 => KeyCode::Function(5),
            Key::F6 => KeyCode::Function(6),
            Key::F7 => KeyCode::Function(7),
            Key::F8 => KeyCode::Function(8),
            Key::F9 => KeyCode::Function(9),
            Key::F10 => KeyCode::Function(10),
            Key::F11 => KeyCode::Function(11),
            Key::F12 => KeyCode::Function(12),

            Key::Return | Key::KpReturn => KeyCode::Enter,
            Key::Space => KeyCode::Space,
            Key::Tab => KeyCode::Tab,
            Key::Escape => KeyCode::Escape,
            Key::Backspace => KeyCode::Backspace,
            Key::Delete | Key::KpDelete => KeyCode::Delete,
            Key::UpArrow => KeyCode::Up,
            Key::DownArrow => KeyCode::Down,
            Key::LeftArrow => KeyCode::Left,
            Key::RightArrow => KeyCode::Right,
            Key::Home => KeyCode::Home,
            Key::End => KeyCode::End,
            Key::PageUp => KeyCode::PageUp,
            Key::PageDown => KeyCode::PageDown,

            Key::ShiftLeft | Key::ShiftRight => KeyCode::Shift,
            Key::ControlLeft | Key::ControlRight => KeyCode::Control,
            Key::Alt | Key::AltGr => KeyCode::Alt,
            Key::MetaLeft | Key::MetaRight => KeyCode::Meta,
            Key::CapsLock => KeyCode::CapsLock,

            Key::Unknown(code) => KeyCode::Unmapped(format!("code {}", code)),
            other => KeyCode::Unmapped(format!("{:?}", other)),
        }
    }
}
