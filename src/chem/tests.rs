use super::*;

const TOLERANCE: f64 = 1e-6;

fn smiles(s: &str) -> MassAnnotation {
    SmilesCalculator.calculate(s).unwrap()
}

fn assert_mass(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_simple_aliphatic() {
    let water = smiles("O");
    assert_eq!(water.formula, "H2O");
    assert_mass(water.exact_mass, 18.010_564_684);

    let ethanol = smiles("CCO");
    assert_eq!(ethanol.formula, "C2H6O");
    assert_mass(ethanol.exact_mass, 46.041_864_813);

    let acetic_acid = smiles("CC(=O)O");
    assert_eq!(acetic_acid.formula, "C2H4O2");
    assert_mass(acetic_acid.exact_mass, 60.021_129_368);
}

#[test]
fn test_aromatic_rings() {
    let benzene = smiles("c1ccccc1");
    assert_eq!(benzene.formula, "C6H6");
    assert_mass(benzene.exact_mass, 78.046_950_193);

    assert_eq!(smiles("c1ccncc1").formula, "C5H5N");
    assert_eq!(smiles("c1cc[nH]c1").formula, "C4H5N");
    assert_eq!(smiles("c1ccsc1").formula, "C4H4S");
    assert_eq!(smiles("c1ccoc1").formula, "C4H4O");
    // Fused ring junction carbons carry no hydrogen
    assert_eq!(smiles("c1ccc2ccccc2c1").formula, "C10H8");
}

#[test]
fn test_caffeine() {
    let caffeine = smiles("CN1C=NC2=C1C(=O)N(C(=O)N2C)C");
    assert_eq!(caffeine.formula, "C8H10N4O2");
    assert_mass(caffeine.exact_mass, 194.080_375_579);
}

#[test]
fn test_charges_and_salts() {
    let salt = smiles("[Na+].[Cl-]");
    assert_eq!(salt.formula, "ClNa");
    assert_mass(salt.exact_mass, 57.958_621_964);

    let ammonium = smiles("[NH4+]");
    assert_eq!(ammonium.formula, "H4N+");
    assert_mass(ammonium.exact_mass, 18.033_825_553);
}

#[test]
fn test_isotopes_and_stereo() {
    let methanol_d3 = smiles("[2H]C([2H])([2H])O");
    assert_eq!(methanol_d3.formula, "CH4O");
    assert_mass(methanol_d3.exact_mass, 35.045_044_986);

    let lactic_acid = smiles("C[C@@H](O)C(=O)O");
    assert_eq!(lactic_acid.formula, "C3H6O3");
    assert_mass(lactic_acid.exact_mass, 90.031_694_052);

    assert_eq!(smiles("F/C=C/F").formula, "C2H2F2");
}

#[test]
fn test_two_digit_ring_and_hill_order() {
    let cyclohexane = smiles("C%10CCCCC%10");
    assert_eq!(cyclohexane.formula, "C6H12");
    assert_mass(cyclohexane.exact_mass, 84.093_900_387);

    assert_eq!(smiles("BrCCCCl").formula, "C3H6BrCl");
}

#[test]
fn test_smiles_errors() {
    assert_eq!(parse_smiles("C1CC").unwrap_err(), ChemError::UnclosedRing(1));
    assert_eq!(
        parse_smiles("C(C").unwrap_err(),
        ChemError::UnbalancedParenthesis(1)
    );
    assert_eq!(parse_smiles("   ").unwrap_err(), ChemError::EmptyInput);
    assert_eq!(parse_smiles("C*").unwrap_err(), ChemError::WildcardAtom(1));
    assert_eq!(
        parse_smiles("[C").unwrap_err(),
        ChemError::InvalidBracketAtom(0)
    );
    assert!(matches!(
        parse_smiles("[Xx]").unwrap_err(),
        ChemError::UnknownElement(_)
    ));
    assert!(matches!(
        parse_smiles("[99C]").unwrap_err(),
        ChemError::UnknownIsotope { mass_number: 99, .. }
    ));
    assert!(matches!(
        parse_smiles("C(C)(C)(C)(C)C").unwrap_err(),
        ChemError::ValenceExceeded { bond_order: 5, .. }
    ));
    assert!(matches!(
        parse_smiles("CC?").unwrap_err(),
        ChemError::UnexpectedChar { ch: '?', position: 2 }
    ));
}

#[test]
fn test_formula_parsing() {
    let caffeine: MolecularFormula = "C8H10N4O2".parse().unwrap();
    assert_eq!(caffeine.count("N"), 4);
    assert_eq!(caffeine.atom_count(), 24);
    assert_mass(caffeine.monoisotopic_mass(), 194.080_375_579);

    let hydroxide: MolecularFormula = "Ca(OH)2".parse().unwrap();
    assert_eq!(hydroxide.hill_notation(), "CaH2O2");

    let cation: MolecularFormula = "C4H12N+".parse().unwrap();
    assert_eq!(cation.charge(), 1);
    assert_eq!(cation.to_string(), "C4H12N+");

    let dianion: MolecularFormula = "SO4-2".parse().unwrap();
    assert_eq!(dianion.charge(), -2);
    assert_eq!(dianion.to_string(), "O4S-2");
}

#[test]
fn test_formula_errors() {
    assert!(matches!(
        "Xy2".parse::<MolecularFormula>().unwrap_err(),
        ChemError::UnknownElement(_)
    ));
    assert_eq!(
        "C2H6O)".parse::<MolecularFormula>().unwrap_err(),
        ChemError::UnbalancedParenthesis(5)
    );
    assert!(matches!(
        "C2+H".parse::<MolecularFormula>().unwrap_err(),
        ChemError::InvalidCharge(_)
    ));
    assert_eq!(
        "".parse::<MolecularFormula>().unwrap_err(),
        ChemError::EmptyInput
    );
}

#[test]
fn test_oversized_counts_are_rejected() {
    assert_eq!(
        FormulaCalculator.calculate("C99999999999").unwrap_err(),
        ChemError::NumberOutOfRange(1)
    );
    assert_eq!(
        "Ca(OH)99999999999".parse::<MolecularFormula>().unwrap_err(),
        ChemError::NumberOutOfRange(6)
    );
    assert_eq!(
        SmilesCalculator.calculate("[CH99999999999]").unwrap_err(),
        ChemError::NumberOutOfRange(3)
    );
    assert_eq!(
        parse_smiles("[99999999999C]").unwrap_err(),
        ChemError::NumberOutOfRange(1)
    );
}

#[test]
fn test_count_overflow_is_an_error() {
    assert_eq!(
        FormulaCalculator.calculate("C4294967295C").unwrap_err(),
        ChemError::CountOverflow("C".to_string())
    );
    assert_eq!(
        "(C2)2147483648".parse::<MolecularFormula>().unwrap_err(),
        ChemError::CountOverflow("C".to_string())
    );

    let mut formula = MolecularFormula::new();
    assert!(formula.add_charge(i32::MAX).is_ok());
    assert!(matches!(
        formula.add_charge(1).unwrap_err(),
        ChemError::CountOverflow(_)
    ));
    assert_eq!(formula.charge(), i32::MAX);
}

#[test]
fn test_calculators_agree() {
    let from_smiles = StructureKind::Smiles.calculator().calculate("CCO").unwrap();
    let from_formula = StructureKind::Formula.calculator().calculate("C2H6O").unwrap();
    assert_eq!(from_smiles.formula, from_formula.formula);
    assert_mass(from_smiles.exact_mass, from_formula.exact_mass);
}
