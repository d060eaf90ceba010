//! Cricket bus frames and LED command sequences.
//!
//! Every transmission on the bus is a byte plus a command/data flag. A device
//! operation is one command frame (the device-select code) followed by data
//! frames: a sub-command with the device ID folded in, then the payload.
//!
//! ```text
//! decimal / hex / brightness:  [select] [sub+id] [high] [low]
//! pattern:                     [select] [sub+id] [d1] [d2] [d3] [d4]
//! ```

/// Device-select codes, always sent as command frames
pub mod device {
    /// 4-digit LED display
    pub const LED: u8 = 0x10;
    /// Motor controller board
    pub const MOTOR: u8 = 0x12;
    /// Lamp/relay board
    pub const RELAY: u8 = 0x16;
}

/// LED display sub-commands (device ID is added to these)
pub mod led {
    /// Next two bytes are a number shown in decimal
    pub const NUMBER: u8 = 0x00;
    /// Next two bytes are a number shown in hex
    pub const HEX: u8 = 0x20;
    /// Next four bytes are raw segment patterns
    pub const PATTERN: u8 = 0x40;
    /// Next two bytes are a brightness level
    pub const BRIGHTNESS: u8 = 0x80;

    /// Brightness levels are 0-7
    pub const BRIGHTNESS_MASK: u8 = 0x07;
}

/// Longest command sequence (pattern command)
pub const MAX_SEQUENCE_LEN: usize = 6;

/// Whether a frame carries a command or data byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameKind {
    /// Flag bit low
    Command,
    /// Flag bit high
    Data,
}

impl FrameKind {
    /// Level of the flag bit on the wire (true = high)
    pub const fn flag_is_high(self) -> bool {
        matches!(self, FrameKind::Data)
    }
}

/// One byte on the bus together with its command/data flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    pub byte: u8,
    pub kind: FrameKind,
}

impl Frame {
    pub const fn command(byte: u8) -> Self {
        Self {
            byte,
            kind: FrameKind::Command,
        }
    }

    pub const fn data(byte: u8) -> Self {
        Self {
            byte,
            kind: FrameKind::Data,
        }
    }

    pub const fn is_command(&self) -> bool {
        matches!(self.kind, FrameKind::Command)
    }
}

/// Identifies which unit on the bus a command is for
///
/// Units select their ID with a trace cut on the board. The value is added
/// to the sub-command byte as-is; IDs the receivers don't recognise are
/// simply ignored by them, so no range check is done here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceId(pub u8);

impl DeviceId {
    /// Every unit responds
    pub const ANY: Self = Self(0);
    pub const FIRST: Self = Self(1);
    pub const SECOND: Self = Self(2);

    /// Fold the ID into a sub-command byte
    pub const fn apply(self, sub_command: u8) -> u8 {
        sub_command.wrapping_add(self.0)
    }
}

impl From<u8> for DeviceId {
    fn from(id: u8) -> Self {
        Self(id)
    }
}

/// A fixed, ordered list of frames making up one device operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSequence {
    frames: [Frame; MAX_SEQUENCE_LEN],
    len: usize,
}

impl CommandSequence {
    fn with_payload<const N: usize>(select: u8, sub_command: u8, payload: [u8; N]) -> Self {
        let mut frames = [Frame::data(0); MAX_SEQUENCE_LEN];
        frames[0] = Frame::command(select);
        frames[1] = Frame::data(sub_command);
        for (slot, byte) in frames[2..].iter_mut().zip(payload) {
            *slot = Frame::data(byte);
        }

        Self {
            frames,
            len: (2 + N).min(MAX_SEQUENCE_LEN),
        }
    }

    pub fn as_slice(&self) -> &[Frame] {
        &self.frames[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Frame> {
        self.as_slice().iter()
    }
}

impl core::ops::Deref for CommandSequence {
    type Target = [Frame];

    fn deref(&self) -> &[Frame] {
        self.as_slice()
    }
}

impl<'a> IntoIterator for &'a CommandSequence {
    type Item = &'a Frame;
    type IntoIter = core::slice::Iter<'a, Frame>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for CommandSequence {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{=[?]}", self.as_slice())
    }
}

/// Operations understood by the Cricket LED display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedCommand {
    /// Show a 16-bit number in decimal
    Decimal { value: u16, id: DeviceId },
    /// Show a 16-bit number in hex
    Hex { value: u16, id: DeviceId },
    /// Set brightness; only the low three bits of `level` are sent
    Brightness { level: u8, id: DeviceId },
    /// Set raw segments of the four digits, leftmost first
    Pattern { digits: [u8; 4], id: DeviceId },
}

impl LedCommand {
    /// Target device of this command
    pub fn id(&self) -> DeviceId {
        match *self {
            LedCommand::Decimal { id, .. }
            | LedCommand::Hex { id, .. }
            | LedCommand::Brightness { id, .. }
            | LedCommand::Pattern { id, .. } => id,
        }
    }

    /// Sub-command byte with the device ID applied
    pub fn sub_command(&self) -> u8 {
        let base = match self {
            LedCommand::Decimal { .. } => led::NUMBER,
            LedCommand::Hex { .. } => led::HEX,
            LedCommand::Brightness { .. } => led::BRIGHTNESS,
            LedCommand::Pattern { .. } => led::PATTERN,
        };
        self.id().apply(base)
    }

    /// Frames to put on the bus for this command, in order
    pub fn sequence(&self) -> CommandSequence {
        let sub = self.sub_command();
        match *self {
            LedCommand::Decimal { value, .. } | LedCommand::Hex { value, .. } => {
                CommandSequence::with_payload(device::LED, sub, value.to_be_bytes())
            }
            LedCommand::Brightness { level, .. } => {
                CommandSequence::with_payload(device::LED, sub, [0, level & led::BRIGHTNESS_MASK])
            }
            LedCommand::Pattern { digits, .. } => {
                CommandSequence::with_payload(device::LED, sub, digits)
            }
        }
    }
}
