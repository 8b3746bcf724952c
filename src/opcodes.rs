//! Opcode values and the static classification table.
//!
//! Every one of the 256 byte values has an explicit entry in
//! [`OPCODE_ATTRIBUTES`]; lookups never fail.

// 0x00 range - arithmetic/stop
pub const STOP: u8 = 0x00;
pub const ADD: u8 = 0x01;

// 0x50 range - stack/memory/storage/flow
pub const JUMPDEST: u8 = 0x5b;
pub const RJUMP: u8 = 0x5c;
pub const RJUMPI: u8 = 0x5d;
pub const RJUMPV: u8 = 0x5e;
pub const PUSH0: u8 = 0x5f;

// 0x60..0x7f - PUSH1..PUSH32
pub const PUSH1: u8 = 0x60;
pub const PUSH2: u8 = 0x61;
pub const PUSH32: u8 = 0x7f;

// 0xf0 range - system
pub const RETURN: u8 = 0xf3;
pub const REVERT: u8 = 0xfd;
pub const INVALID: u8 = 0xfe;
pub const SELFDESTRUCT: u8 = 0xff;

/// Classification flags of a single opcode value.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Attributes(u8);

impl Attributes {
    /// Not a recognized instruction.
    pub const UNDEFINED: Attributes = Attributes(0);
    const DEFINED_BIT: u8 = 0x01;
    const TERMINAL_BIT: u8 = 0x02;
    const JUMPDEST_BIT: u8 = 0x04;

    pub const DEFINED: Attributes = Attributes(Self::DEFINED_BIT);
    pub const DEFINED_AND_TERMINAL: Attributes = Attributes(Self::DEFINED_BIT | Self::TERMINAL_BIT);
    pub const DEFINED_AND_JUMPDEST: Attributes = Attributes(Self::DEFINED_BIT | Self::JUMPDEST_BIT);

    /// Returns `true` if the opcode is a recognized instruction.
    #[inline]
    pub fn is_defined(self) -> bool {
        self.0 & Self::DEFINED_BIT != 0
    }

    /// Returns `true` if the opcode may be the last instruction of a code
    /// stream.
    #[inline]
    pub fn is_terminal(self) -> bool {
        self.0 & Self::TERMINAL_BIT != 0
    }

    /// Returns `true` if the opcode is a jump destination marker.
    #[inline]
    pub fn is_jumpdest(self) -> bool {
        self.0 & Self::JUMPDEST_BIT != 0
    }
}

const U: Attributes = Attributes::UNDEFINED;
const D: Attributes = Attributes::DEFINED;
const T: Attributes = Attributes::DEFINED_AND_TERMINAL;
const J: Attributes = Attributes::DEFINED_AND_JUMPDEST;

/// Classification of every byte value, indexed by opcode.
#[rustfmt::skip]
pub static OPCODE_ATTRIBUTES: [Attributes; 256] = [
    //  0  1  2  3  4  5  6  7  8  9  a  b  c  d  e  f
    T, D, D, D, D, D, D, D, D, D, D, D, U, U, U, U, // 0x00 STOP..SIGNEXTEND
    D, D, D, D, D, D, D, D, D, D, D, D, D, D, U, U, // 0x10 LT..SAR
    D, U, U, U, U, U, U, U, U, U, U, U, U, U, U, U, // 0x20 SHA3
    D, D, D, D, D, D, D, D, D, D, D, D, D, D, D, D, // 0x30 ADDRESS..EXTCODEHASH
    D, D, D, D, D, D, D, D, D, U, U, U, U, U, U, U, // 0x40 BLOCKHASH..BASEFEE
    D, D, D, D, D, D, D, D, D, D, D, J, D, D, D, D, // 0x50 POP..PUSH0
    D, D, D, D, D, D, D, D, D, D, D, D, D, D, D, D, // 0x60 PUSH1..PUSH16
    D, D, D, D, D, D, D, D, D, D, D, D, D, D, D, D, // 0x70 PUSH17..PUSH32
    D, D, D, D, D, D, D, D, D, D, D, D, D, D, D, D, // 0x80 DUP1..DUP16
    D, D, D, D, D, D, D, D, D, D, D, D, D, D, D, D, // 0x90 SWAP1..SWAP16
    D, D, D, D, D, U, U, U, U, U, U, U, U, U, U, U, // 0xa0 LOG0..LOG4
    U, U, U, U, U, U, U, U, U, U, U, U, U, U, U, U, // 0xb0
    U, U, U, U, U, U, U, U, U, U, U, U, U, U, U, U, // 0xc0
    U, U, U, U, U, U, U, U, U, U, U, U, U, U, U, U, // 0xd0
    U, U, U, U, U, U, U, U, U, U, U, U, U, U, U, U, // 0xe0
    D, D, D, T, D, D, U, U, U, U, D, U, U, T, T, T, // 0xf0 CREATE..SELFDESTRUCT
];

/// Returns the classification of `opcode`.
#[inline]
pub fn attributes(opcode: u8) -> Attributes {
    OPCODE_ATTRIBUTES[opcode as usize]
}

/// Number of immediate bytes carried by `PUSH1..=PUSH32`. `PUSH0` and every
/// other opcode carry none and yield `None`.
#[inline]
pub fn push_data_len(opcode: u8) -> Option<usize> {
    if opcode > PUSH0 && opcode <= PUSH32 {
        Some((opcode - PUSH0) as usize)
    } else {
        None
    }
}

const PUSH_NAMES: [&str; 32] = [
    "PUSH1", "PUSH2", "PUSH3", "PUSH4", "PUSH5", "PUSH6", "PUSH7", "PUSH8", "PUSH9", "PUSH10",
    "PUSH11", "PUSH12", "PUSH13", "PUSH14", "PUSH15", "PUSH16", "PUSH17", "PUSH18", "PUSH19",
    "PUSH20", "PUSH21", "PUSH22", "PUSH23", "PUSH24", "PUSH25", "PUSH26", "PUSH27", "PUSH28",
    "PUSH29", "PUSH30", "PUSH31", "PUSH32",
];

const DUP_NAMES: [&str; 16] = [
    "DUP1", "DUP2", "DUP3", "DUP4", "DUP5", "DUP6", "DUP7", "DUP8", "DUP9", "DUP10", "DUP11",
    "DUP12", "DUP13", "DUP14", "DUP15", "DUP16",
];

const SWAP_NAMES: [&str; 16] = [
    "SWAP1", "SWAP2", "SWAP3", "SWAP4", "SWAP5", "SWAP6", "SWAP7", "SWAP8", "SWAP9", "SWAP10",
    "SWAP11", "SWAP12", "SWAP13", "SWAP14", "SWAP15", "SWAP16",
];

/// Mnemonic of a defined opcode, `None` for undefined byte values.
pub fn name(opcode: u8) -> Option<&'static str> {
    let name = match opcode {
        0x00 => "STOP",
        0x01 => "ADD",
        0x02 => "MUL",
        0x03 => "SUB",
        0x04 => "DIV",
        0x05 => "SDIV",
        0x06 => "MOD",
        0x07 => "SMOD",
        0x08 => "ADDMOD",
        0x09 => "MULMOD",
        0x0a => "EXP",
        0x0b => "SIGNEXTEND",
        0x10 => "LT",
        0x11 => "GT",
        0x12 => "SLT",
        0x13 => "SGT",
        0x14 => "EQ",
        0x15 => "ISZERO",
        0x16 => "AND",
        0x17 => "OR",
        0x18 => "XOR",
        0x19 => "NOT",
        0x1a => "BYTE",
        0x1b => "SHL",
        0x1c => "SHR",
        0x1d => "SAR",
        0x20 => "SHA3",
        0x30 => "ADDRESS",
        0x31 => "BALANCE",
        0x32 => "ORIGIN",
        0x33 => "CALLER",
        0x34 => "CALLVALUE",
        0x35 => "CALLDATALOAD",
        0x36 => "CALLDATASIZE",
        0x37 => "CALLDATACOPY",
        0x38 => "CODESIZE",
        0x39 => "CODECOPY",
        0x3a => "GASPRICE",
        0x3b => "EXTCODESIZE",
        0x3c => "EXTCODECOPY",
        0x3d => "RETURNDATASIZE",
        0x3e => "RETURNDATACOPY",
        0x3f => "EXTCODEHASH",
        0x40 => "BLOCKHASH",
        0x41 => "COINBASE",
        0x42 => "TIMESTAMP",
        0x43 => "NUMBER",
        0x44 => "DIFFICULTY",
        0x45 => "GASLIMIT",
        0x46 => "CHAINID",
        0x47 => "SELFBALANCE",
        0x48 => "BASEFEE",
        0x50 => "POP",
        0x51 => "MLOAD",
        0x52 => "MSTORE",
        0x53 => "MSTORE8",
        0x54 => "SLOAD",
        0x55 => "SSTORE",
        0x56 => "JUMP",
        0x57 => "JUMPI",
        0x58 => "PC",
        0x59 => "MSIZE",
        0x5a => "GAS",
        0x5b => "JUMPDEST",
        0x5c => "RJUMP",
        0x5d => "RJUMPI",
        0x5e => "RJUMPV",
        0x5f => "PUSH0",
        0x60..=0x7f => PUSH_NAMES[(opcode - PUSH1) as usize],
        0x80..=0x8f => DUP_NAMES[(opcode - 0x80) as usize],
        0x90..=0x9f => SWAP_NAMES[(opcode - 0x90) as usize],
        0xa0 => "LOG0",
        0xa1 => "LOG1",
        0xa2 => "LOG2",
        0xa3 => "LOG3",
        0xa4 => "LOG4",
        0xf0 => "CREATE",
        0xf1 => "CALL",
        0xf2 => "CALLCODE",
        0xf3 => "RETURN",
        0xf4 => "DELEGATECALL",
        0xf5 => "CREATE2",
        0xfa => "STATICCALL",
        0xfd => "REVERT",
        0xfe => "INVALID",
        0xff => "SELFDESTRUCT",
        _ => return None,
    };
    Some(name)
}
