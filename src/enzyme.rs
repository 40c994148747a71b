use std::fmt;

use crate::strand::{Base, Strand};

/// A 2-base window of a strand, the unit of translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codon(pub Base, pub Base);

impl fmt::Display for Codon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

/// One enzyme operation.
///
/// The set mirrors the codon table exactly, with one addition: `Spl` is
/// honored by the execution unit but encoded by no codon, so translation
/// never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Instruction {
    /// Cut the strand after the head.
    Cut,
    /// Delete the base under the head.
    Del,
    /// Switch to the complementary strand, preserving the physical position.
    Swi,
    /// Move the head one base right.
    Mvr,
    /// Move the head one base left.
    Mvl,
    /// Turn copy mode on.
    Cop,
    /// Turn copy mode off, finalizing the current copy.
    Off,
    /// Insert an A to the right of the head.
    Ina,
    /// Insert a C to the right of the head.
    Inc,
    /// Insert a G to the right of the head.
    Ing,
    /// Insert a T to the right of the head.
    Int,
    /// Move right to the nearest pyrimidine (C or T).
    Rpy,
    /// Move right to the nearest purine (A or G).
    Rpu,
    /// Move left to the nearest pyrimidine.
    Lpy,
    /// Move left to the nearest purine.
    Lpu,
    /// Re-join the pending cut fragment; no-op if no cut is pending.
    Spl,
}

impl Instruction {
    /// All instructions, table order first, `Spl` last.
    pub const ALL: [Instruction; 16] = [
        Instruction::Cut,
        Instruction::Del,
        Instruction::Swi,
        Instruction::Mvr,
        Instruction::Mvl,
        Instruction::Cop,
        Instruction::Off,
        Instruction::Ina,
        Instruction::Inc,
        Instruction::Ing,
        Instruction::Int,
        Instruction::Rpy,
        Instruction::Rpu,
        Instruction::Lpy,
        Instruction::Lpu,
        Instruction::Spl,
    ];

    /// The codon encoding this instruction, or `None` for `Spl`.
    pub fn codon(self) -> Option<Codon> {
        use Base::*;
        let (a, b) = match self {
            Instruction::Cut => (A, C),
            Instruction::Del => (A, G),
            Instruction::Swi => (A, T),
            Instruction::Mvr => (C, A),
            Instruction::Mvl => (C, C),
            Instruction::Cop => (C, G),
            Instruction::Off => (C, T),
            Instruction::Ina => (G, A),
            Instruction::Inc => (G, C),
            Instruction::Ing => (G, G),
            Instruction::Int => (G, T),
            Instruction::Rpy => (T, A),
            Instruction::Rpu => (T, C),
            Instruction::Lpy => (T, G),
            Instruction::Lpu => (T, T),
            Instruction::Spl => return None,
        };
        Some(Codon(a, b))
    }

    pub fn name(self) -> &'static str {
        match self {
            Instruction::Cut => "cut",
            Instruction::Del => "del",
            Instruction::Swi => "swi",
            Instruction::Mvr => "mvr",
            Instruction::Mvl => "mvl",
            Instruction::Cop => "cop",
            Instruction::Off => "off",
            Instruction::Ina => "ina",
            Instruction::Inc => "inc",
            Instruction::Ing => "ing",
            Instruction::Int => "int",
            Instruction::Rpy => "rpy",
            Instruction::Rpu => "rpu",
            Instruction::Lpy => "lpy",
            Instruction::Lpu => "lpu",
            Instruction::Spl => "spl",
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Look up a codon in the fixed table.
///
/// `None` is the stop signal: `AA` is the single codon with no mapping, and
/// hitting it is a normal outcome of translation, not an error.
pub fn instruction_for(codon: Codon) -> Option<Instruction> {
    use Base::*;
    match (codon.0, codon.1) {
        (A, A) => None,
        (A, C) => Some(Instruction::Cut),
        (A, G) => Some(Instruction::Del),
        (A, T) => Some(Instruction::Swi),
        (C, A) => Some(Instruction::Mvr),
        (C, C) => Some(Instruction::Mvl),
        (C, G) => Some(Instruction::Cop),
        (C, T) => Some(Instruction::Off),
        (G, A) => Some(Instruction::Ina),
        (G, C) => Some(Instruction::Inc),
        (G, G) => Some(Instruction::Ing),
        (G, T) => Some(Instruction::Int),
        (T, A) => Some(Instruction::Rpy),
        (T, C) => Some(Instruction::Rpu),
        (T, G) => Some(Instruction::Lpy),
        (T, T) => Some(Instruction::Lpu),
    }
}

/// An ordered instruction sequence derived from a strand.
///
/// An enzyme with no instructions is valid; executing it leaves its target
/// strand unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enzyme {
    instructions: Vec<Instruction>,
}

impl Enzyme {
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl From<Vec<Instruction>> for Enzyme {
    fn from(instructions: Vec<Instruction>) -> Self {
        Enzyme { instructions }
    }
}

impl fmt::Display for Enzyme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, instr) in self.instructions.iter().enumerate() {
            if i > 0 {
                write!(f, "-")?;
            }
            write!(f, "{instr}")?;
        }
        Ok(())
    }
}

/// Translate a strand into its enzymes.
///
/// The strand is scanned in non-overlapping 2-base windows from offset 0.
/// A mapped codon extends the current enzyme; the stop codon closes it (an
/// empty enzyme counts) and begins the next one. A trailing lone base is
/// discarded without error. The enzyme open at end of strand is kept if it
/// holds any instruction or was begun by a stop, so joining the enzymes'
/// codons with the stop codon between them rebuilds the translated prefix of
/// the strand; a strand with no complete codons yields no enzymes at all.
pub fn translate(strand: &Strand) -> Vec<Enzyme> {
    let mut enzymes = Vec::new();
    let mut current: Vec<Instruction> = Vec::new();
    let mut saw_stop = false;
    for window in strand.bases().chunks_exact(2) {
        match instruction_for(Codon(window[0], window[1])) {
            Some(instr) => current.push(instr),
            None => {
                enzymes.push(Enzyme::from(std::mem::take(&mut current)));
                saw_stop = true;
            }
        }
    }
    if !current.is_empty() || saw_stop {
        enzymes.push(Enzyme::from(current));
    }
    enzymes
}
