use crate::enzyme::{Enzyme, Instruction};
use crate::strand::{Base, Strand};

/// Run an enzyme against a strand and collect every strand that results.
///
/// The enzyme binds to the first base with copy mode off, then interprets
/// its instructions in order. Execution ends when the instructions are
/// exhausted or the head moves past either end of the strand; both are
/// normal terminations. Outputs are the strands emitted mid-run (displaced
/// cut fragments, copies finalized by `off`), then the copy still open at
/// the end, then the pending cut fragment, then whatever remains of the
/// working strand. Empty strands are never emitted, and an empty input has
/// nothing to bind to, so it yields nothing at all.
pub fn execute(enzyme: &Enzyme, strand: &Strand) -> Vec<Strand> {
    if strand.is_empty() {
        return Vec::new();
    }
    let mut machine = Machine::bind(strand);
    for &instr in enzyme.instructions() {
        if !machine.step(instr) {
            break;
        }
    }
    machine.finish()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Orientation {
    Original,
    Complementary,
}

impl Orientation {
    fn flipped(self) -> Orientation {
        match self {
            Orientation::Original => Orientation::Complementary,
            Orientation::Complementary => Orientation::Original,
        }
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Left,
    Right,
}

/// State of one enzyme execution.
///
/// The working strand is kept in head-reading order, so `swi` rewrites the
/// buffer to its reverse complement and mirrors the head index instead of
/// tracking two physical strands. Between steps the head always rests on a
/// base: `0 <= head < strand.len()`, and the strand is non-empty.
struct Machine {
    strand: Vec<Base>,
    head: usize,
    orientation: Orientation,
    copying: bool,
    copy: Vec<Base>,
    detached: Option<Vec<Base>>,
    emitted: Vec<Strand>,
}

impl Machine {
    fn bind(strand: &Strand) -> Machine {
        Machine {
            strand: strand.bases().to_vec(),
            head: 0,
            orientation: Orientation::Original,
            copying: false,
            copy: Vec::new(),
            detached: None,
            emitted: Vec::new(),
        }
    }

    /// Interpret a single instruction. Returns false when execution halts.
    fn step(&mut self, instr: Instruction) -> bool {
        match instr {
            Instruction::Mvr => self.shift(Direction::Right),
            Instruction::Mvl => self.shift(Direction::Left),
            Instruction::Rpy => self.seek(Direction::Right, Base::is_pyrimidine),
            Instruction::Rpu => self.seek(Direction::Right, Base::is_purine),
            Instruction::Lpy => self.seek(Direction::Left, Base::is_pyrimidine),
            Instruction::Lpu => self.seek(Direction::Left, Base::is_purine),
            Instruction::Cop => {
                if !self.copying {
                    self.copying = true;
                    self.copy.push(self.strand[self.head]);
                }
                true
            }
            Instruction::Off => {
                self.copying = false;
                self.flush_copy();
                true
            }
            Instruction::Swi => {
                self.strand.reverse();
                for base in &mut self.strand {
                    *base = base.complement();
                }
                self.head = self.strand.len() - 1 - self.head;
                self.orientation = self.orientation.flipped();
                true
            }
            Instruction::Cut => {
                // The tail may be empty (head on the last base); it still
                // displaces any fragment already pending.
                let tail = self.strand.split_off(self.head + 1);
                if let Some(displaced) = self.detached.replace(tail) {
                    self.emit(displaced);
                }
                true
            }
            Instruction::Spl => {
                if let Some(tail) = self.detached.take() {
                    self.strand.extend(tail);
                }
                true
            }
            Instruction::Ina => self.insert(Base::A),
            Instruction::Inc => self.insert(Base::C),
            Instruction::Ing => self.insert(Base::G),
            Instruction::Int => self.insert(Base::T),
            Instruction::Del => {
                self.strand.remove(self.head);
                if self.copying {
                    self.copy.pop();
                }
                self.head < self.strand.len()
            }
        }
    }

    /// Move the head one base, copying the landing base while copy mode is
    /// on. Returns false if the head left the strand.
    fn shift(&mut self, dir: Direction) -> bool {
        match dir {
            Direction::Right => {
                self.head += 1;
                if self.head == self.strand.len() {
                    return false;
                }
            }
            Direction::Left => {
                if self.head == 0 {
                    return false;
                }
                self.head -= 1;
            }
        }
        if self.copying {
            self.copy.push(self.strand[self.head]);
        }
        true
    }

    /// Repeated shifts until the head lands on a wanted base. The head moves
    /// at least once, so a search can leave a base that already matches.
    fn seek(&mut self, dir: Direction, wanted: fn(Base) -> bool) -> bool {
        loop {
            if !self.shift(dir) {
                return false;
            }
            if wanted(self.strand[self.head]) {
                return true;
            }
        }
    }

    fn insert(&mut self, base: Base) -> bool {
        self.strand.insert(self.head + 1, base);
        if self.copying {
            self.copy.push(base);
        }
        true
    }

    fn flush_copy(&mut self) {
        let copy = std::mem::take(&mut self.copy);
        self.emit(copy);
    }

    fn emit(&mut self, bases: Vec<Base>) {
        if !bases.is_empty() {
            self.emitted.push(Strand::from(bases));
        }
    }

    fn finish(mut self) -> Vec<Strand> {
        self.flush_copy();
        if let Some(tail) = self.detached.take() {
            self.emit(tail);
        }
        let remainder = std::mem::take(&mut self.strand);
        self.emit(remainder);
        self.emitted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Instruction::*;

    fn exec(strand: &str, instructions: &[Instruction]) -> Vec<String> {
        let strand: Strand = strand.parse().unwrap();
        execute(&Enzyme::from(instructions.to_vec()), &strand)
            .iter()
            .map(Strand::to_string)
            .collect()
    }

    #[test]
    fn test_empty_enzyme_returns_the_strand_unchanged() {
        assert_eq!(exec("CAT", &[]), ["CAT"]);
    }

    #[test]
    fn test_empty_strand_yields_nothing() {
        let empty = Strand::default();
        assert!(execute(&Enzyme::from(vec![]), &empty).is_empty());
        assert!(execute(&Enzyme::from(vec![Mvr, Cop, Cut]), &empty).is_empty());
    }

    #[test]
    fn test_falling_off_the_right_end_halts_execution() {
        // The second mvr leaves the strand, so the insert never runs.
        assert_eq!(exec("CA", &[Mvr, Mvr, Ina]), ["CA"]);
    }

    #[test]
    fn test_falling_off_the_left_end_halts_execution() {
        assert_eq!(exec("CA", &[Mvl, Ina]), ["CA"]);
    }

    #[test]
    fn test_cop_records_the_base_under_the_head() {
        assert_eq!(exec("CAT", &[Cop]), ["C", "CAT"]);
    }

    #[test]
    fn test_copy_follows_the_head() {
        assert_eq!(exec("CAT", &[Cop, Mvr, Mvr]), ["CAT", "CAT"]);
    }

    #[test]
    fn test_cop_is_idempotent_while_already_on() {
        // A second cop must not duplicate the base under the head.
        assert_eq!(exec("CAT", &[Cop, Cop, Mvr]), ["CA", "CAT"]);
    }

    #[test]
    fn test_off_emits_the_copy_mid_run() {
        // The copy closed by off is emitted before later edits touch the
        // working strand.
        assert_eq!(exec("CATG", &[Cop, Mvr, Off, Mvr, Ina]), ["CA", "CATAG"]);
    }

    #[test]
    fn test_off_with_nothing_copied_is_a_no_op() {
        assert_eq!(exec("CAT", &[Off]), ["CAT"]);
    }

    #[test]
    fn test_swi_rebinds_to_the_reverse_complement() {
        assert_eq!(exec("CAT", &[Swi]), ["ATG"]);
    }

    #[test]
    fn test_swi_keeps_the_head_on_the_same_physical_base() {
        // Head on the final T of CAT; after swi the strand reads ATG and the
        // head sits on the A that pairs with that T.
        assert_eq!(exec("CAT", &[Mvr, Mvr, Swi, Cop]), ["A", "ATG"]);
    }

    #[test]
    fn test_swi_twice_restores_the_full_machine_state() {
        let strand: Strand = "CAT".parse().unwrap();
        let mut machine = Machine::bind(&strand);
        machine.step(Mvr);
        let before = (machine.strand.clone(), machine.head, machine.orientation);

        machine.step(Swi);
        assert_eq!(machine.strand, "ATG".parse::<Strand>().unwrap().bases());
        assert_eq!(machine.head, 1);
        assert_eq!(machine.orientation, Orientation::Complementary);

        machine.step(Swi);
        assert_eq!(
            (machine.strand.clone(), machine.head, machine.orientation),
            before
        );
    }

    #[test]
    fn test_cut_detaches_the_tail() {
        assert_eq!(exec("CATG", &[Mvr, Cut]), ["TG", "CA"]);
    }

    #[test]
    fn test_second_cut_displaces_the_pending_fragment() {
        // The first cut leaves ATG pending; the second cut displaces it as
        // final output and records an empty tail, which is never emitted.
        assert_eq!(exec("CATG", &[Cut, Cut]), ["ATG", "C"]);
    }

    #[test]
    fn test_cut_then_splice_restores_the_strand() {
        assert_eq!(exec("CATG", &[Mvr, Cut, Spl]), ["CATG"]);
    }

    #[test]
    fn test_splice_without_a_pending_cut_is_a_no_op() {
        assert_eq!(exec("CAT", &[Spl]), ["CAT"]);
    }

    #[test]
    fn test_insert_lands_right_of_the_head() {
        assert_eq!(exec("CAT", &[Ing]), ["CGAT"]);
    }

    #[test]
    fn test_insert_leaves_the_head_in_place() {
        // After the insert the head still reads the C.
        assert_eq!(exec("CAT", &[Ing, Cop]), ["C", "CGAT"]);
    }

    #[test]
    fn test_insert_feeds_the_copy() {
        assert_eq!(exec("CA", &[Cop, Int]), ["CT", "CTA"]);
    }

    #[test]
    fn test_del_removes_the_base_under_the_head() {
        assert_eq!(exec("CAT", &[Del]), ["AT"]);
    }

    #[test]
    fn test_del_pops_the_newest_copied_base() {
        assert_eq!(exec("CAT", &[Cop, Mvr, Del]), ["C", "CT"]);
    }

    #[test]
    fn test_del_on_the_last_position_halts() {
        // Deleting the final base leaves the head past the end.
        assert_eq!(exec("CA", &[Mvr, Del, Ina]), ["C"]);
    }

    #[test]
    fn test_deleting_the_only_base_yields_nothing() {
        assert_eq!(exec("C", &[Del]), Vec::<String>::new());
    }

    #[test]
    fn test_rpy_stops_on_the_nearest_pyrimidine() {
        // Head lands on the C at index 3, then the insert goes after it.
        assert_eq!(exec("AAGCT", &[Rpy, Ina]), ["AAGCAT"]);
    }

    #[test]
    fn test_search_moves_before_testing() {
        // Bound to a C, rpy must still leave it and stop on the next
        // pyrimidine; the copy shows every base the head visited.
        assert_eq!(exec("CAC", &[Cop, Rpy]), ["CAC", "CAC"]);
    }

    #[test]
    fn test_lpu_stops_on_the_nearest_purine() {
        assert_eq!(exec("CAGTT", &[Mvr, Mvr, Mvr, Mvr, Lpu, Ina]), ["CAGATT"]);
    }

    #[test]
    fn test_search_can_fall_off_the_strand() {
        assert_eq!(exec("CCT", &[Rpu]), ["CCT"]);
    }
}
