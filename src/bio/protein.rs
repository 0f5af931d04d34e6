//! Protein sequence analysis.
//!
//! Works on one-letter amino-acid sequences over the 20 standard residues,
//! in either case. Provides per-residue isoelectric points, residue
//! frequencies, three-letter conversion, monoisotopic mass and
//! back-translation to RNA.

use super::SeqError;
use bio::alphabets::Alphabet;
use indexmap::IndexMap;
use itertools::Itertools;
use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;
use std::collections::HashMap;
use std::str::FromStr;

/// Static properties of a single amino-acid residue.
#[derive(Debug, Clone, PartialEq)]
pub struct Residue {
    pub three_letter: &'static str,
    /// Isoelectric point (pH units).
    pub isoelectric_point: f64,
    /// Monoisotopic residue mass (Da).
    pub monoisotopic_mass: f64,
    /// Synonymous RNA codons of the standard genetic code.
    pub codons: &'static [&'static str],
}

// (one-letter, three-letter, pI, monoisotopic mass, codons)
const STANDARD_RESIDUES: [(char, &str, f64, f64, &[&str]); 20] = [
    ('A', "Ala", 6.00, 71.03711, &["GCU", "GCC", "GCA", "GCG"]),
    ('R', "Arg", 10.76, 156.10111, &["CGU", "CGC", "CGA", "CGG", "AGA", "AGG"]),
    ('N', "Asn", 5.41, 114.04293, &["AAU", "AAC"]),
    ('D', "Asp", 2.77, 115.02694, &["GAU", "GAC"]),
    ('C', "Cys", 5.07, 103.00919, &["UGU", "UGC"]),
    ('E', "Glu", 3.22, 129.04259, &["GAA", "GAG"]),
    ('Q', "Gln", 5.65, 128.05858, &["CAA", "CAG"]),
    ('G', "Gly", 5.97, 57.02146, &["GGU", "GGC", "GGA", "GGG"]),
    ('H', "His", 7.59, 137.05891, &["CAU", "CAC"]),
    ('I', "Ile", 6.02, 113.08406, &["AUU", "AUC", "AUA"]),
    ('L', "Leu", 5.98, 113.08406, &["UUA", "UUG", "CUU", "CUC", "CUA", "CUG"]),
    ('K', "Lys", 9.74, 128.09496, &["AAA", "AAG"]),
    ('M', "Met", 5.74, 131.04049, &["AUG"]),
    ('F', "Phe", 5.48, 147.06841, &["UUU", "UUC"]),
    ('P', "Pro", 6.30, 97.05276, &["CCU", "CCC", "CCA", "CCG"]),
    ('S', "Ser", 5.68, 87.03203, &["UCU", "UCC", "UCA", "UCG", "AGU", "AGC"]),
    ('T', "Thr", 5.60, 101.04768, &["ACU", "ACC", "ACA", "ACG"]),
    ('W', "Trp", 5.89, 186.07931, &["UGG"]),
    ('Y', "Tyr", 5.66, 163.06333, &["UAU", "UAC"]),
    ('V', "Val", 5.96, 99.06841, &["GUU", "GUC", "GUA", "GUG"]),
];

/// Residue lookup table keyed by upper-case one-letter code.
#[derive(Debug, Clone)]
pub struct ProteinTables {
    alphabet: Alphabet,
    residues: HashMap<char, Residue>,
}

impl ProteinTables {
    /// The 20 standard amino acids.
    pub fn standard() -> Self {
        let residues: HashMap<char, Residue> = STANDARD_RESIDUES
            .iter()
            .map(|&(code, three_letter, pi, mass, codons)| {
                (
                    code,
                    Residue {
                        three_letter,
                        isoelectric_point: pi,
                        monoisotopic_mass: mass,
                        codons,
                    },
                )
            })
            .collect();

        let symbols: Vec<u8> = residues
            .keys()
            .flat_map(|&c| [c as u8, c.to_ascii_lowercase() as u8])
            .collect();

        ProteinTables {
            alphabet: Alphabet::new(symbols),
            residues,
        }
    }

    /// Looks up a residue by one-letter code, in either case.
    pub fn residue(&self, code: char) -> Option<&Residue> {
        self.residues.get(&code.to_ascii_uppercase())
    }

    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }
}

impl Default for ProteinTables {
    fn default() -> Self {
        Self::standard()
    }
}

/// A named protein analysis. Accepts both the short names and the
/// descriptive ones (`get_pI`, `calculate_aa_freq`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProteinAction {
    IsoelectricPoints,
    Frequency,
    BackTranslate,
    ThreeLetter,
    Mass,
}

impl FromStr for ProteinAction {
    type Err = SeqError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "get_pI" | "isoelectric_points" => Ok(ProteinAction::IsoelectricPoints),
            "calculate_aa_freq" | "frequency" => Ok(ProteinAction::Frequency),
            "translate_protein_rna" | "back_translate" => Ok(ProteinAction::BackTranslate),
            "convert_to_3L_code" | "three_letter" => Ok(ProteinAction::ThreeLetter),
            "protein_mass" | "mass" => Ok(ProteinAction::Mass),
            _ => Err(SeqError::UnsupportedAction(s.to_string())),
        }
    }
}

/// Result of a single [`ProteinAction`].
#[derive(Debug, Clone, PartialEq)]
pub enum ProteinOutput {
    IsoelectricPoints(Vec<(char, f64)>),
    Frequency(IndexMap<char, usize>),
    Rna(String),
    ThreeLetter(String),
    Mass(f64),
}

/// Protein toolkit bound to a residue table.
#[derive(Debug, Clone, Copy)]
pub struct ProteinTools<'t> {
    tables: &'t ProteinTables,
}

impl<'t> ProteinTools<'t> {
    pub fn new(tables: &'t ProteinTables) -> Self {
        ProteinTools { tables }
    }

    /// True if every character is one of the 20 standard residues.
    pub fn is_protein(&self, sequence: &str) -> bool {
        self.tables.alphabet.is_word(sequence.as_bytes())
    }

    fn validate(&self, sequence: &str) -> Result<(), SeqError> {
        if self.is_protein(sequence) {
            Ok(())
        } else {
            Err(SeqError::NotProtein(sequence.to_string()))
        }
    }

    // Validated sequences only contain table residues.
    fn residues<'s>(&'s self, sequence: &'s str) -> impl Iterator<Item = &'t Residue> + 's {
        let tables = self.tables;
        sequence.chars().filter_map(move |aa| tables.residue(aa))
    }

    /// Isoelectric point of each distinct residue.
    ///
    /// Residues are reported once, in order of first appearance, keeping the
    /// case of that first appearance.
    pub fn isoelectric_points(&self, sequence: &str) -> Result<Vec<(char, f64)>, SeqError> {
        self.validate(sequence)?;

        let mut seen = IndexMap::new();
        for aa in sequence.chars() {
            if let Some(residue) = self.tables.residue(aa) {
                seen.entry(aa.to_ascii_uppercase())
                    .or_insert((aa, residue.isoelectric_point));
            }
        }
        Ok(seen.into_values().collect())
    }

    /// Counts each residue in order of first appearance.
    ///
    /// Counting is case-folded, so `"aA"` yields `{'A': 2}` rather than one
    /// count per spelling.
    pub fn amino_acid_frequency(&self, sequence: &str) -> Result<IndexMap<char, usize>, SeqError> {
        self.validate(sequence)?;

        let mut frequency = IndexMap::new();
        for aa in sequence.chars() {
            *frequency.entry(aa.to_ascii_uppercase()).or_insert(0) += 1;
        }
        Ok(frequency)
    }

    /// Converts one-letter codes to dash-separated three-letter codes,
    /// e.g. `"AC"` -> `"Ala-Cys"`.
    pub fn to_three_letter(&self, sequence: &str) -> Result<String, SeqError> {
        self.validate(sequence)?;
        Ok(self.residues(sequence).map(|r| r.three_letter).join("-"))
    }

    /// Sum of monoisotopic residue masses.
    pub fn protein_mass(&self, sequence: &str) -> Result<f64, SeqError> {
        self.validate(sequence)?;
        Ok(self.residues(sequence).map(|r| r.monoisotopic_mass).sum())
    }

    /// Back-translates a protein into RNA.
    ///
    /// Each residue is replaced by one of its synonymous codons, chosen
    /// uniformly at random from `rng`. A seeded generator makes the output
    /// reproducible.
    pub fn back_translate<R: Rng + ?Sized>(
        &self,
        sequence: &str,
        rng: &mut R,
    ) -> Result<String, SeqError> {
        self.validate(sequence)?;

        let mut rna = String::with_capacity(sequence.len() * 3);
        for residue in self.residues(sequence) {
            if let Some(codon) = residue.codons.choose(rng) {
                rna.push_str(codon);
            }
        }
        Ok(rna)
    }

    pub fn apply<R: Rng + ?Sized>(
        &self,
        sequence: &str,
        action: ProteinAction,
        rng: &mut R,
    ) -> Result<ProteinOutput, SeqError> {
        Ok(match action {
            ProteinAction::IsoelectricPoints => {
                ProteinOutput::IsoelectricPoints(self.isoelectric_points(sequence)?)
            }
            ProteinAction::Frequency => ProteinOutput::Frequency(self.amino_acid_frequency(sequence)?),
            ProteinAction::BackTranslate => ProteinOutput::Rna(self.back_translate(sequence, rng)?),
            ProteinAction::ThreeLetter => ProteinOutput::ThreeLetter(self.to_three_letter(sequence)?),
            ProteinAction::Mass => ProteinOutput::Mass(self.protein_mass(sequence)?),
        })
    }

    /// Runs a named action over several sequences.
    ///
    /// Every sequence is validated before any work is done, so a bad
    /// sequence anywhere in the batch fails the whole run.
    pub fn run<S: AsRef<str>, R: Rng + ?Sized>(
        &self,
        sequences: &[S],
        action: &str,
        rng: &mut R,
    ) -> Result<Vec<ProteinOutput>, SeqError> {
        let action = ProteinAction::from_str(action)?;

        for seq in sequences {
            self.validate(seq.as_ref())?;
        }
        debug!("Running {:?} over {} protein(s)", action, sequences.len());

        sequences
            .iter()
            .map(|seq| self.apply(seq.as_ref(), action, &mut *rng))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_standard_table() {
        let tables = ProteinTables::standard();
        assert_eq!(tables.len(), 20);
        assert_eq!(tables.residue('w').unwrap().three_letter, "Trp");
        assert!(tables.residue('B').is_none());
    }

    #[test]
    fn test_is_protein() {
        let tables = ProteinTables::standard();
        let tools = ProteinTools::new(&tables);
        assert!(tools.is_protein("ACDE"));
        assert!(tools.is_protein("acde"));
        assert!(!tools.is_protein("ACDX"));
        assert!(!tools.is_protein("AC DE"));
    }

    #[test]
    fn test_isoelectric_points_unique_and_case_preserving() {
        let tables = ProteinTables::standard();
        let tools = ProteinTools::new(&tables);
        let pis = tools.isoelectric_points("aRAk").unwrap();
        assert_eq!(pis.len(), 3);
        assert_eq!(pis[0].0, 'a');
        assert_relative_eq!(pis[0].1, 6.00);
        assert_eq!(pis[1].0, 'R');
        assert_relative_eq!(pis[1].1, 10.76);
        assert_eq!(pis[2].0, 'k');
        assert_relative_eq!(pis[2].1, 9.74);
    }

    #[test]
    fn test_amino_acid_frequency() {
        let tables = ProteinTables::standard();
        let tools = ProteinTools::new(&tables);
        let freq = tools.amino_acid_frequency("GAgW").unwrap();
        let pairs: Vec<_> = freq.into_iter().collect();
        assert_eq!(pairs, vec![('G', 2), ('A', 1), ('W', 1)]);
    }

    #[test]
    fn test_to_three_letter() {
        let tables = ProteinTables::standard();
        let tools = ProteinTools::new(&tables);
        assert_eq!(tools.to_three_letter("ACde").unwrap(), "Ala-Cys-Asp-Glu");
        assert_eq!(tools.to_three_letter("M").unwrap(), "Met");
        assert_eq!(tools.to_three_letter("").unwrap(), "");
    }

    #[test]
    fn test_protein_mass() {
        let tables = ProteinTables::standard();
        let tools = ProteinTools::new(&tables);
        let mass = tools.protein_mass("ACDE").unwrap();
        assert_relative_eq!(
            mass,
            71.03711 + 103.00919 + 115.02694 + 129.04259,
            epsilon = 1e-9
        );
        assert_relative_eq!(tools.protein_mass("").unwrap(), 0.0);
    }

    #[test]
    fn test_back_translate_uses_synonymous_codons() {
        let tables = ProteinTables::standard();
        let tools = ProteinTools::new(&tables);
        let mut rng = StdRng::seed_from_u64(42);

        let protein = "MKLsW";
        let rna = tools.back_translate(protein, &mut rng).unwrap();
        assert_eq!(rna.len(), protein.len() * 3);

        for (aa, codon) in protein.chars().zip(rna.as_bytes().chunks(3)) {
            let codon = std::str::from_utf8(codon).unwrap();
            assert!(
                tables.residue(aa).unwrap().codons.contains(&codon),
                "{} is not a codon for {}",
                codon,
                aa
            );
        }
    }

    #[test]
    fn test_back_translate_is_reproducible_with_seed() {
        let tables = ProteinTables::standard();
        let tools = ProteinTools::new(&tables);
        let a = tools
            .back_translate("ARNDLS", &mut StdRng::seed_from_u64(7))
            .unwrap();
        let b = tools
            .back_translate("ARNDLS", &mut StdRng::seed_from_u64(7))
            .unwrap();
        assert_eq!(a, b);
        // Single-codon residues are fixed.
        assert_eq!(
            tools
                .back_translate("MW", &mut StdRng::seed_from_u64(1))
                .unwrap(),
            "AUGUGG"
        );
    }

    #[test]
    fn test_invalid_protein_rejected() {
        let tables = ProteinTables::standard();
        let tools = ProteinTools::new(&tables);
        assert_eq!(
            tools.protein_mass("ACXZ"),
            Err(SeqError::NotProtein("ACXZ".to_string()))
        );
        assert!(tools.to_three_letter("B").is_err());
    }

    #[test]
    fn test_run_dispatch() {
        let tables = ProteinTables::standard();
        let tools = ProteinTools::new(&tables);
        let mut rng = StdRng::seed_from_u64(0);

        let out = tools.run(&["AC", "M"], "convert_to_3L_code", &mut rng).unwrap();
        assert_eq!(
            out,
            vec![
                ProteinOutput::ThreeLetter("Ala-Cys".to_string()),
                ProteinOutput::ThreeLetter("Met".to_string()),
            ]
        );

        assert_eq!(
            tools.run(&["AC"], "fold", &mut rng),
            Err(SeqError::UnsupportedAction("fold".to_string()))
        );
        assert_eq!(
            tools.run(&["AC", "J"], "protein_mass", &mut rng),
            Err(SeqError::NotProtein("J".to_string()))
        );
    }
}
