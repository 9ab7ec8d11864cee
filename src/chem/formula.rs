use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::elements::{self, Element, ELECTRON_MASS};
use super::ChemError;

/// Molecular formula with an accumulated exact mass
///
/// Isotope-labelled atoms count towards their element in the formula but
/// contribute their isotope mass to [`MolecularFormula::monoisotopic_mass`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MolecularFormula {
    counts: BTreeMap<&'static str, u32>,
    neutral_mass: f64,
    charge: i32,
}

impl MolecularFormula {
    /// Create an empty formula
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` atoms of an element, optionally with a specific isotope
    pub fn add_atoms(
        &mut self,
        element: &'static Element,
        isotope: Option<u16>,
        count: u32,
    ) -> Result<(), ChemError> {
        if count == 0 {
            return Ok(());
        }
        let unit_mass = match isotope {
            Some(mass_number) => elements::isotope_mass(element.symbol, mass_number).ok_or_else(
                || ChemError::UnknownIsotope {
                    symbol: element.symbol.to_string(),
                    mass_number,
                },
            )?,
            None => element.monoisotopic_mass,
        };
        let total = self.counts.entry(element.symbol).or_insert(0);
        *total = total
            .checked_add(count)
            .ok_or_else(|| ChemError::CountOverflow(element.symbol.to_string()))?;
        self.neutral_mass += unit_mass * f64::from(count);
        Ok(())
    }

    /// Add to the net charge
    pub fn add_charge(&mut self, charge: i32) -> Result<(), ChemError> {
        self.charge = self
            .charge
            .checked_add(charge)
            .ok_or_else(|| ChemError::CountOverflow("charge".to_string()))?;
        Ok(())
    }

    /// Net formal charge
    pub fn charge(&self) -> i32 {
        self.charge
    }

    /// Number of atoms of the given element
    pub fn count(&self, symbol: &str) -> u32 {
        self.counts.get(symbol).copied().unwrap_or(0)
    }

    /// Total number of atoms
    pub fn atom_count(&self) -> u32 {
        self.counts.values().fold(0, |acc: u32, &n| acc.saturating_add(n))
    }

    /// True if the formula contains no atoms
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Exact mass, corrected for the electrons removed or added by the net charge
    pub fn monoisotopic_mass(&self) -> f64 {
        self.neutral_mass - f64::from(self.charge) * ELECTRON_MASS
    }

    /// Hill-notation string (carbon first, hydrogen second, then alphabetical)
    pub fn hill_notation(&self) -> String {
        let mut out = String::new();
        let has_carbon = self.counts.contains_key("C");

        let mut push = |symbol: &str, count: u32| {
            out.push_str(symbol);
            if count > 1 {
                out.push_str(&count.to_string());
            }
        };

        if has_carbon {
            push("C", self.count("C"));
            if let Some(&h) = self.counts.get("H") {
                push("H", h);
            }
            for (symbol, &count) in &self.counts {
                if *symbol != "C" && *symbol != "H" {
                    push(symbol, count);
                }
            }
        } else {
            for (symbol, &count) in &self.counts {
                push(symbol, count);
            }
        }

        match self.charge {
            0 => {}
            1 => out.push('+'),
            -1 => out.push('-'),
            c if c > 0 => out.push_str(&format!("+{}", c)),
            c => out.push_str(&format!("-{}", -c)),
        }
        out
    }
}

impl fmt::Display for MolecularFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hill_notation())
    }
}

/// Parse a charge suffix such as `+`, `--`, `+2` or `-3`.
///
/// Returns the charge and the number of characters consumed.
pub(crate) fn parse_charge(chars: &[char], start: usize) -> Result<(i32, usize), ChemError> {
    let sign = match chars.get(start) {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Ok((0, 0)),
    };
    let sign_char = chars[start];

    let mut pos = start + 1;
    let digits_start = pos;
    while pos < chars.len() && chars[pos].is_ascii_digit() {
        pos += 1;
    }
    if pos > digits_start {
        let digits: String = chars[digits_start..pos].iter().collect();
        let magnitude: i32 = digits
            .parse()
            .map_err(|_| ChemError::InvalidCharge(digits.clone()))?;
        return Ok((sign * magnitude, pos - start));
    }

    // Repeated signs: "++" is +2
    let mut magnitude = 1;
    while pos < chars.len() && chars[pos] == sign_char {
        magnitude += 1;
        pos += 1;
    }
    Ok((sign * magnitude, pos - start))
}

/// Read an optional digit run. Digits that do not fit a `u32` are an error.
fn read_count(chars: &[char], pos: &mut usize) -> Result<Option<u32>, ChemError> {
    let start = *pos;
    while *pos < chars.len() && chars[*pos].is_ascii_digit() {
        *pos += 1;
    }
    if *pos == start {
        return Ok(None);
    }
    chars[start..*pos]
        .iter()
        .collect::<String>()
        .parse()
        .map(Some)
        .map_err(|_| ChemError::NumberOutOfRange(start))
}

fn merge_count(
    counts: &mut BTreeMap<&'static str, u32>,
    symbol: &'static str,
    count: u32,
) -> Result<(), ChemError> {
    let total = counts.entry(symbol).or_insert(0);
    *total = total
        .checked_add(count)
        .ok_or_else(|| ChemError::CountOverflow(symbol.to_string()))?;
    Ok(())
}

impl FromStr for MolecularFormula {
    type Err = ChemError;

    /// Parse a formula like `C8H10N4O2`, `Ca(OH)2` or `C4H12N+`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ChemError::EmptyInput);
        }

        let chars: Vec<char> = s.chars().collect();
        let mut groups: Vec<(usize, BTreeMap<&'static str, u32>)> = vec![(0, BTreeMap::new())];
        let mut charge = 0;
        let mut pos = 0;

        while pos < chars.len() {
            let c = chars[pos];
            match c {
                'A'..='Z' => {
                    let mut symbol = c.to_string();
                    if let Some(next) = chars.get(pos + 1).filter(|n| n.is_ascii_lowercase()) {
                        symbol.push(*next);
                    }
                    let element = elements::lookup(&symbol)
                        .ok_or_else(|| ChemError::UnknownElement(symbol.clone()))?;
                    pos += symbol.len();
                    let count = read_count(&chars, &mut pos)?.unwrap_or(1);
                    if let Some((_, top)) = groups.last_mut() {
                        merge_count(top, element.symbol, count)?;
                    }
                }
                '(' => {
                    groups.push((pos, BTreeMap::new()));
                    pos += 1;
                }
                ')' => {
                    if groups.len() < 2 {
                        return Err(ChemError::UnbalancedParenthesis(pos));
                    }
                    pos += 1;
                    let multiplier = read_count(&chars, &mut pos)?.unwrap_or(1);
                    if let Some((_, inner)) = groups.pop() {
                        if let Some((_, outer)) = groups.last_mut() {
                            for (symbol, count) in inner {
                                let scaled = count
                                    .checked_mul(multiplier)
                                    .ok_or_else(|| ChemError::CountOverflow(symbol.to_string()))?;
                                merge_count(outer, symbol, scaled)?;
                            }
                        }
                    }
                }
                '+' | '-' => {
                    let (parsed, consumed) = parse_charge(&chars, pos)?;
                    if pos + consumed != chars.len() {
                        return Err(ChemError::InvalidCharge(chars[pos..].iter().collect()));
                    }
                    pos += consumed;
                    charge = parsed;
                }
                _ => return Err(ChemError::UnexpectedChar { ch: c, position: pos }),
            }
        }

        if groups.len() != 1 {
            return Err(ChemError::UnbalancedParenthesis(groups[groups.len() - 1].0));
        }

        let mut formula = MolecularFormula::new();
        if let Some((_, counts)) = groups.pop() {
            for (symbol, count) in counts {
                let element = elements::lookup(symbol)
                    .ok_or_else(|| ChemError::UnknownElement(symbol.to_string()))?;
                formula.add_atoms(element, None, count)?;
            }
        }
        if formula.is_empty() {
            return Err(ChemError::EmptyInput);
        }
        formula.add_charge(charge)?;
        Ok(formula)
    }
}
