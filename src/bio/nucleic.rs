//! DNA/RNA sequence transformations.
//!
//! Supports transcription, reversal, complement and reverse complement of
//! sequences over `{A,T,G,C,U}` in either case. Case is preserved by every
//! operation. A sequence containing `U` is treated as RNA, anything else
//! from the alphabet as DNA; a sequence containing both `T` and `U` is
//! rejected.

use super::{SeqError, NUCLEIC_BASES};
use bio::alphabets::Alphabet;
use log::debug;
use std::collections::HashMap;
use std::str::FromStr;

/// Lookup tables for nucleic-acid transformations.
#[derive(Debug, Clone)]
pub struct NucleotideTables {
    alphabet: Alphabet,
    transcription: HashMap<char, char>,
    dna_complement: HashMap<char, char>,
    rna_complement: HashMap<char, char>,
}

impl NucleotideTables {
    /// Standard Watson-Crick tables.
    pub fn standard() -> Self {
        let transcription = [('T', 'U'), ('t', 'u')].into_iter().collect();

        let dna_complement = [
            ('A', 'T'),
            ('T', 'A'),
            ('C', 'G'),
            ('G', 'C'),
            ('a', 't'),
            ('t', 'a'),
            ('c', 'g'),
            ('g', 'c'),
        ]
        .into_iter()
        .collect();

        let rna_complement = [
            ('A', 'U'),
            ('U', 'A'),
            ('C', 'G'),
            ('G', 'C'),
            ('a', 'u'),
            ('u', 'a'),
            ('c', 'g'),
            ('g', 'c'),
        ]
        .into_iter()
        .collect();

        NucleotideTables {
            alphabet: Alphabet::new(NUCLEIC_BASES),
            transcription,
            dna_complement,
            rna_complement,
        }
    }
}

impl Default for NucleotideTables {
    fn default() -> Self {
        Self::standard()
    }
}

/// Kind of nucleic acid inferred from a validated sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NucleicKind {
    Dna,
    Rna,
}

/// A named transformation, parsed case-insensitively from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NucleicAction {
    Transcribe,
    Reverse,
    Complement,
    ReverseComplement,
}

impl FromStr for NucleicAction {
    type Err = SeqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "transcribe" => Ok(NucleicAction::Transcribe),
            "reverse" => Ok(NucleicAction::Reverse),
            "complement" => Ok(NucleicAction::Complement),
            "reverse_complement" => Ok(NucleicAction::ReverseComplement),
            _ => Err(SeqError::UnsupportedAction(s.to_string())),
        }
    }
}

/// DNA/RNA toolkit bound to a set of lookup tables.
#[derive(Debug, Clone, Copy)]
pub struct NucleicAcidTools<'t> {
    tables: &'t NucleotideTables,
}

impl<'t> NucleicAcidTools<'t> {
    pub fn new(tables: &'t NucleotideTables) -> Self {
        NucleicAcidTools { tables }
    }

    /// Validates a sequence and reports whether it is DNA or RNA.
    pub fn classify(&self, sequence: &str) -> Result<NucleicKind, SeqError> {
        if !self.tables.alphabet.is_word(sequence.as_bytes()) {
            return Err(SeqError::InvalidSequence(sequence.to_string()));
        }

        let has_t = sequence.bytes().any(|b| b.eq_ignore_ascii_case(&b'T'));
        let has_u = sequence.bytes().any(|b| b.eq_ignore_ascii_case(&b'U'));

        match (has_t, has_u) {
            (true, true) => Err(SeqError::MixedNucleicAcid(sequence.to_string())),
            (_, true) => Ok(NucleicKind::Rna),
            _ => Ok(NucleicKind::Dna),
        }
    }

    /// Transcribes DNA into RNA (T -> U).
    pub fn transcribe(&self, sequence: &str) -> Result<String, SeqError> {
        match self.classify(sequence)? {
            NucleicKind::Dna => Ok(map_bases(sequence, &self.tables.transcription)),
            NucleicKind::Rna => Err(SeqError::NotDna(sequence.to_string())),
        }
    }

    /// Reverses a validated sequence.
    pub fn reverse(&self, sequence: &str) -> Result<String, SeqError> {
        self.classify(sequence)?;
        Ok(sequence.chars().rev().collect())
    }

    /// Complements a sequence using the DNA or RNA pairing rules.
    pub fn complement(&self, sequence: &str) -> Result<String, SeqError> {
        let table = match self.classify(sequence)? {
            NucleicKind::Dna => &self.tables.dna_complement,
            NucleicKind::Rna => &self.tables.rna_complement,
        };
        Ok(map_bases(sequence, table))
    }

    pub fn reverse_complement(&self, sequence: &str) -> Result<String, SeqError> {
        let complement = self.complement(sequence)?;
        Ok(complement.chars().rev().collect())
    }

    /// Applies a single action to a sequence.
    pub fn apply(&self, sequence: &str, action: NucleicAction) -> Result<String, SeqError> {
        match action {
            NucleicAction::Transcribe => self.transcribe(sequence),
            NucleicAction::Reverse => self.reverse(sequence),
            NucleicAction::Complement => self.complement(sequence),
            NucleicAction::ReverseComplement => self.reverse_complement(sequence),
        }
    }

    /// Runs a named action over several sequences.
    ///
    /// # Arguments
    ///
    /// * `sequences` - The sequences to transform.
    /// * `action` - One of `transcribe`, `reverse`, `complement`,
    ///   `reverse_complement` (case-insensitive).
    ///
    /// # Returns
    ///
    /// * `Result<Vec<String>, SeqError>` - One result per input sequence, in
    ///   order. The first invalid sequence or an unknown action aborts the run.
    pub fn run<S: AsRef<str>>(
        &self,
        sequences: &[S],
        action: &str,
    ) -> Result<Vec<String>, SeqError> {
        let action = NucleicAction::from_str(action)?;
        debug!("Running {:?} over {} sequence(s)", action, sequences.len());

        sequences
            .iter()
            .map(|seq| self.apply(seq.as_ref(), action))
            .collect()
    }
}

fn map_bases(sequence: &str, table: &HashMap<char, char>) -> String {
    sequence
        .chars()
        .map(|base| table.get(&base).copied().unwrap_or(base))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcribe() {
        let tables = NucleotideTables::standard();
        let tools = NucleicAcidTools::new(&tables);
        assert_eq!(tools.transcribe("ATGC").unwrap(), "AUGC");
        assert_eq!(tools.transcribe("aTtg").unwrap(), "aUug");
    }

    #[test]
    fn test_transcribe_rejects_rna() {
        let tables = NucleotideTables::standard();
        let tools = NucleicAcidTools::new(&tables);
        assert_eq!(
            tools.transcribe("AUGC"),
            Err(SeqError::NotDna("AUGC".to_string()))
        );
    }

    #[test]
    fn test_reverse_preserves_case() {
        let tables = NucleotideTables::standard();
        let tools = NucleicAcidTools::new(&tables);
        assert_eq!(tools.reverse("ATcg").unwrap(), "gcTA");
    }

    #[test]
    fn test_complement_dna_and_rna() {
        let tables = NucleotideTables::standard();
        let tools = NucleicAcidTools::new(&tables);
        assert_eq!(tools.complement("ATGC").unwrap(), "TACG");
        assert_eq!(tools.complement("AUGC").unwrap(), "UACG");
        assert_eq!(tools.complement("atgc").unwrap(), "tacg");
    }

    #[test]
    fn test_reverse_complement_simple() {
        let tables = NucleotideTables::standard();
        let tools = NucleicAcidTools::new(&tables);
        assert_eq!(tools.reverse_complement("GATTACA").unwrap(), "TGTAATC");
        assert_eq!(tools.reverse_complement("GAATTC").unwrap(), "GAATTC");
        assert_eq!(tools.reverse_complement("aCgT").unwrap(), "AcGt");
        assert_eq!(tools.reverse_complement("").unwrap(), "");
    }

    #[test]
    fn test_mixed_t_and_u_rejected() {
        let tables = NucleotideTables::standard();
        let tools = NucleicAcidTools::new(&tables);
        assert_eq!(
            tools.complement("ATU"),
            Err(SeqError::MixedNucleicAcid("ATU".to_string()))
        );
        assert!(tools.reverse("tu").is_err());
    }

    #[test]
    fn test_invalid_characters_rejected() {
        let tables = NucleotideTables::standard();
        let tools = NucleicAcidTools::new(&tables);
        assert_eq!(
            tools.reverse("ATXG"),
            Err(SeqError::InvalidSequence("ATXG".to_string()))
        );
        assert!(tools.transcribe("ATGN").is_err());
    }

    #[test]
    fn test_action_parsing() {
        assert_eq!(
            "Reverse_Complement".parse::<NucleicAction>().unwrap(),
            NucleicAction::ReverseComplement
        );
        assert_eq!(
            "fold".parse::<NucleicAction>(),
            Err(SeqError::UnsupportedAction("fold".to_string()))
        );
    }

    #[test]
    fn test_run_over_several_sequences() {
        let tables = NucleotideTables::standard();
        let tools = NucleicAcidTools::new(&tables);
        let out = tools.run(&["ATcg", "AUG"], "reverse").unwrap();
        assert_eq!(out, vec!["gcTA".to_string(), "GUA".to_string()]);

        assert!(tools.run(&["ATG"], "translate").is_err());
        assert!(tools.run(&["ATG", "AXG"], "complement").is_err());
        assert!(tools.run::<&str>(&[], "reverse").unwrap().is_empty());
    }
}
