//! Minimal SMILES reader for exact-mass calculation.
//!
//! Only the information needed for a molecular formula is kept: atoms,
//! isotopes, charges, explicit hydrogens and the bond-order sum per atom.
//! Stereochemistry and atom classes are read and discarded.

use std::collections::HashMap;

use super::elements::{self, Element};
use super::formula::{parse_charge, MolecularFormula};
use super::ChemError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bond {
    Single,
    Double,
    Triple,
    Quadruple,
    Aromatic,
}

impl Bond {
    fn order(self) -> u32 {
        match self {
            Bond::Single | Bond::Aromatic => 1,
            Bond::Double => 2,
            Bond::Triple => 3,
            Bond::Quadruple => 4,
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c {
            '-' | '/' | '\\' => Some(Bond::Single),
            '=' => Some(Bond::Double),
            '#' => Some(Bond::Triple),
            '$' => Some(Bond::Quadruple),
            ':' => Some(Bond::Aromatic),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
struct Atom {
    element: &'static Element,
    isotope: Option<u16>,
    aromatic: bool,
    /// `Some` for bracket atoms, which never receive implicit hydrogens
    hydrogens: Option<u32>,
    charge: i32,
    bond_order: u32,
    position: usize,
}

impl Atom {
    fn organic(element: &'static Element, aromatic: bool, position: usize) -> Self {
        Self {
            element,
            isotope: None,
            aromatic,
            hydrogens: None,
            charge: 0,
            bond_order: 0,
            position,
        }
    }

    /// Hydrogen count: explicit for bracket atoms, derived from the lowest
    /// default valence that fits the bonds otherwise.
    fn hydrogen_count(&self) -> Result<u32, ChemError> {
        if let Some(h) = self.hydrogens {
            return Ok(h);
        }

        let valences = self.element.default_valences;
        let fits = |needed: u32| valences.iter().copied().find(|&v| v >= needed);

        // Aromatic b/c/n/p contribute one electron to the pi system
        let pi_bonded = self.aromatic && matches!(self.element.symbol, "B" | "C" | "N" | "P");
        if pi_bonded {
            if let Some(v) = fits(self.bond_order + 1) {
                return Ok(v - self.bond_order - 1);
            }
        }

        fits(self.bond_order)
            .map(|v| v - self.bond_order)
            .ok_or_else(|| ChemError::ValenceExceeded {
                symbol: self.element.symbol.to_string(),
                position: self.position,
                bond_order: self.bond_order,
            })
    }
}

struct Parser<'a> {
    chars: &'a [char],
    pos: usize,
    atoms: Vec<Atom>,
    prev: Option<usize>,
    pending_bond: Option<Bond>,
    branches: Vec<(usize, Option<usize>)>,
    rings: HashMap<u32, (usize, Option<Bond>)>,
}

impl<'a> Parser<'a> {
    fn new(chars: &'a [char]) -> Self {
        Self {
            chars,
            pos: 0,
            atoms: Vec::new(),
            prev: None,
            pending_bond: None,
            branches: Vec::new(),
            rings: HashMap::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn unexpected(&self) -> ChemError {
        match self.peek() {
            Some(ch) => ChemError::UnexpectedChar {
                ch,
                position: self.pos,
            },
            None => ChemError::UnexpectedChar {
                ch: ' ',
                position: self.pos,
            },
        }
    }

    fn parse(mut self) -> Result<Vec<Atom>, ChemError> {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                break;
            }
            match c {
                'B' | 'C' | 'N' | 'O' | 'P' | 'S' | 'F' | 'I' => {
                    let position = self.pos;
                    let symbol = match (c, self.chars.get(self.pos + 1)) {
                        ('B', Some('r')) => "Br".to_string(),
                        ('C', Some('l')) => "Cl".to_string(),
                        _ => c.to_string(),
                    };
                    self.pos += symbol.len();
                    let element = elements::lookup(&symbol)
                        .ok_or_else(|| ChemError::UnknownElement(symbol.clone()))?;
                    self.add_atom(Atom::organic(element, false, position));
                }
                'b' | 'c' | 'n' | 'o' | 'p' | 's' => {
                    let position = self.pos;
                    let symbol = c.to_ascii_uppercase().to_string();
                    self.pos += 1;
                    let element = elements::lookup(&symbol)
                        .ok_or_else(|| ChemError::UnknownElement(symbol.clone()))?;
                    self.add_atom(Atom::organic(element, true, position));
                }
                '*' => return Err(ChemError::WildcardAtom(self.pos)),
                '[' => {
                    let atom = self.parse_bracket_atom()?;
                    self.add_atom(atom);
                }
                '(' => {
                    let anchor = self.prev.ok_or_else(|| self.unexpected())?;
                    self.branches.push((self.pos, Some(anchor)));
                    self.pos += 1;
                }
                ')' => {
                    let (_, anchor) = self
                        .branches
                        .pop()
                        .ok_or(ChemError::UnbalancedParenthesis(self.pos))?;
                    if self.pending_bond.is_some() {
                        return Err(self.unexpected());
                    }
                    self.prev = anchor;
                    self.pos += 1;
                }
                '.' => {
                    if self.pending_bond.is_some() {
                        return Err(self.unexpected());
                    }
                    self.prev = None;
                    self.pos += 1;
                }
                '0'..='9' => {
                    let digit = c.to_digit(10).unwrap_or(0);
                    self.pos += 1;
                    self.ring_bond(digit)?;
                }
                '%' => {
                    let digits: String = self
                        .chars
                        .iter()
                        .skip(self.pos + 1)
                        .take(2)
                        .filter(|d| d.is_ascii_digit())
                        .collect();
                    if digits.len() != 2 {
                        return Err(self.unexpected());
                    }
                    let number = digits.parse().map_err(|_| self.unexpected())?;
                    self.pos += 3;
                    self.ring_bond(number)?;
                }
                _ => {
                    if let Some(bond) = Bond::from_char(c) {
                        if self.pending_bond.is_some() || self.prev.is_none() {
                            return Err(self.unexpected());
                        }
                        self.pending_bond = Some(bond);
                        self.pos += 1;
                    } else {
                        return Err(self.unexpected());
                    }
                }
            }
        }

        if let Some((position, _)) = self.branches.last() {
            return Err(ChemError::UnbalancedParenthesis(*position));
        }
        if let Some(ring) = self.rings.keys().min() {
            return Err(ChemError::UnclosedRing(*ring));
        }
        if self.pending_bond.is_some() {
            return Err(self.unexpected());
        }
        if self.atoms.is_empty() {
            return Err(ChemError::EmptyInput);
        }
        Ok(self.atoms)
    }

    fn add_atom(&mut self, atom: Atom) {
        let index = self.atoms.len();
        self.atoms.push(atom);
        if let Some(prev) = self.prev {
            let bond = self.pending_bond.take();
            self.connect(prev, index, bond);
        }
        self.prev = Some(index);
    }

    fn connect(&mut self, a: usize, b: usize, bond: Option<Bond>) {
        let bond = bond.unwrap_or(if self.atoms[a].aromatic && self.atoms[b].aromatic {
            Bond::Aromatic
        } else {
            Bond::Single
        });
        self.atoms[a].bond_order += bond.order();
        self.atoms[b].bond_order += bond.order();
    }

    fn ring_bond(&mut self, number: u32) -> Result<(), ChemError> {
        let current = self.prev.ok_or_else(|| self.unexpected())?;
        let bond = self.pending_bond.take();
        match self.rings.remove(&number) {
            Some((opener, opening_bond)) => {
                self.connect(opener, current, bond.or(opening_bond));
            }
            None => {
                self.rings.insert(number, (current, bond));
            }
        }
        Ok(())
    }

    fn read_number(&mut self) -> Result<Option<u32>, ChemError> {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.pos += 1;
        }
        if self.pos == start {
            return Ok(None);
        }
        self.chars[start..self.pos]
            .iter()
            .collect::<String>()
            .parse()
            .map(Some)
            .map_err(|_| ChemError::NumberOutOfRange(start))
    }

    fn parse_bracket_atom(&mut self) -> Result<Atom, ChemError> {
        let open = self.pos;
        let invalid = ChemError::InvalidBracketAtom(open);
        self.pos += 1;

        let isotope = match self.read_number()? {
            Some(n) => Some(u16::try_from(n).map_err(|_| invalid.clone())?),
            None => None,
        };

        let first = self.peek().ok_or_else(|| invalid.clone())?;
        if first == '*' {
            return Err(ChemError::WildcardAtom(self.pos));
        }
        let aromatic = first.is_ascii_lowercase();
        if !first.is_ascii_alphabetic() {
            return Err(invalid);
        }

        // Prefer the two-letter symbol when it names a known element ("Sc" vs "S")
        let one: String = first.to_ascii_uppercase().to_string();
        let two = self
            .chars
            .get(self.pos + 1)
            .filter(|c| c.is_ascii_lowercase())
            .map(|c| format!("{}{}", one, c));
        let element = match two.as_deref().and_then(elements::lookup) {
            Some(element) => {
                self.pos += 2;
                element
            }
            None => {
                self.pos += 1;
                elements::lookup(&one).ok_or(ChemError::UnknownElement(one))?
            }
        };

        // Chirality (@, @@, @TH1, @SP2, ...)
        while self.peek() == Some('@') {
            self.pos += 1;
        }
        let class: String = self.chars.iter().skip(self.pos).take(2).collect();
        if matches!(class.as_str(), "TH" | "AL" | "SP" | "TB" | "OH") {
            self.pos += 2;
            self.read_number()?;
        }

        let mut hydrogens = 0;
        if self.peek() == Some('H') {
            self.pos += 1;
            hydrogens = self.read_number()?.unwrap_or(1);
        }

        let (charge, consumed) = parse_charge(self.chars, self.pos)?;
        self.pos += consumed;

        // Atom class
        if self.peek() == Some(':') {
            self.pos += 1;
            self.read_number()?.ok_or_else(|| invalid.clone())?;
        }

        if self.peek() != Some(']') {
            return Err(invalid);
        }
        self.pos += 1;

        Ok(Atom {
            element,
            isotope,
            aromatic,
            hydrogens: Some(hydrogens),
            charge,
            bond_order: 0,
            position: open,
        })
    }
}

/// Parse a SMILES string into its molecular formula
pub fn parse_smiles(smiles: &str) -> Result<MolecularFormula, ChemError> {
    let chars: Vec<char> = smiles.trim().chars().collect();
    if chars.is_empty() {
        return Err(ChemError::EmptyInput);
    }

    let atoms = Parser::new(&chars).parse()?;
    let hydrogen = elements::lookup("H").ok_or_else(|| ChemError::UnknownElement("H".into()))?;

    let mut formula = MolecularFormula::new();
    for atom in &atoms {
        formula.add_atoms(atom.element, atom.isotope, 1)?;
        formula.add_atoms(hydrogen, None, atom.hydrogen_count()?)?;
        formula.add_charge(atom.charge)?;
    }
    Ok(formula)
}
