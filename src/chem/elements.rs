//! Element and isotope reference data.
//!
//! Masses are monoisotopic masses of the most abundant isotope (AME2016),
//! matching the values used by common cheminformatics toolkits.

/// Mass of an electron in Daltons, subtracted once per positive charge
pub const ELECTRON_MASS: f64 = 0.000_548_579_909;

/// A chemical element with the data needed for exact-mass calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Element {
    /// Element symbol (e.g., "C", "Cl")
    pub symbol: &'static str,
    /// Atomic number
    pub atomic_number: u8,
    /// Monoisotopic mass of the most abundant isotope
    pub monoisotopic_mass: f64,
    /// Default valences used to derive implicit hydrogens (organic subset only)
    pub default_valences: &'static [u32],
}

const fn el(
    symbol: &'static str,
    atomic_number: u8,
    monoisotopic_mass: f64,
    default_valences: &'static [u32],
) -> Element {
    Element {
        symbol,
        atomic_number,
        monoisotopic_mass,
        default_valences,
    }
}

static ELEMENTS: &[Element] = &[
    // --- Period 1 ---
    el("H", 1, 1.007_825_032_23, &[1]),
    el("He", 2, 4.002_603_254_13, &[]),
    // --- Period 2 ---
    el("Li", 3, 7.016_003_436_6, &[]),
    el("Be", 4, 9.012_183_065, &[]),
    el("B", 5, 11.009_305_36, &[3]),
    el("C", 6, 12.0, &[4]),
    el("N", 7, 14.003_074_004_43, &[3, 5]),
    el("O", 8, 15.994_914_619_57, &[2]),
    el("F", 9, 18.998_403_162_73, &[1]),
    el("Ne", 10, 19.992_440_176_2, &[]),
    // --- Period 3 ---
    el("Na", 11, 22.989_769_282, &[]),
    el("Mg", 12, 23.985_041_697, &[]),
    el("Al", 13, 26.981_538_53, &[]),
    el("Si", 14, 27.976_926_534_65, &[]),
    el("P", 15, 30.973_761_998_42, &[3, 5]),
    el("S", 16, 31.972_071_174_4, &[2, 4, 6]),
    el("Cl", 17, 34.968_852_682, &[1]),
    el("Ar", 18, 39.962_383_123_7, &[]),
    // --- Period 4 ---
    el("K", 19, 38.963_706_486_4, &[]),
    el("Ca", 20, 39.962_590_863, &[]),
    el("Sc", 21, 44.955_908_28, &[]),
    el("Ti", 22, 47.947_941_98, &[]),
    el("V", 23, 50.943_957_04, &[]),
    el("Cr", 24, 51.940_506_23, &[]),
    el("Mn", 25, 54.938_043_91, &[]),
    el("Fe", 26, 55.934_936_33, &[]),
    el("Co", 27, 58.933_194_29, &[]),
    el("Ni", 28, 57.935_342_41, &[]),
    el("Cu", 29, 62.929_597_72, &[]),
    el("Zn", 30, 63.929_142_01, &[]),
    el("Ga", 31, 68.925_573_5, &[]),
    el("Ge", 32, 73.921_177_761, &[]),
    el("As", 33, 74.921_594_57, &[]),
    el("Se", 34, 79.916_521_8, &[]),
    el("Br", 35, 78.918_337_6, &[1]),
    el("Kr", 36, 83.911_497_728_2, &[]),
    // --- Period 5 ---
    el("Rb", 37, 84.911_789_737_9, &[]),
    el("Sr", 38, 87.905_612_5, &[]),
    el("Y", 39, 88.905_840_3, &[]),
    el("Zr", 40, 89.904_697_7, &[]),
    el("Nb", 41, 92.906_373, &[]),
    el("Mo", 42, 97.905_404_82, &[]),
    el("Ru", 44, 101.904_344_1, &[]),
    el("Rh", 45, 102.905_498, &[]),
    el("Pd", 46, 105.903_480_4, &[]),
    el("Ag", 47, 106.905_091_6, &[]),
    el("Cd", 48, 113.903_365_09, &[]),
    el("In", 49, 114.903_878_776, &[]),
    el("Sn", 50, 119.902_201_63, &[]),
    el("Sb", 51, 120.903_812, &[]),
    el("Te", 52, 129.906_222_748, &[]),
    el("I", 53, 126.904_471_9, &[1]),
    el("Xe", 54, 131.904_155_085_6, &[]),
    // --- Period 6 (selected) ---
    el("Cs", 55, 132.905_451_961, &[]),
    el("Ba", 56, 137.905_247, &[]),
    el("La", 57, 138.906_356_3, &[]),
    el("Ce", 58, 139.905_443_1, &[]),
    el("Gd", 64, 157.924_112_3, &[]),
    el("W", 74, 183.950_930_92, &[]),
    el("Pt", 78, 194.964_791_7, &[]),
    el("Au", 79, 196.966_568_79, &[]),
    el("Hg", 80, 201.970_643_4, &[]),
    el("Tl", 81, 204.974_427_8, &[]),
    el("Pb", 82, 207.976_652_5, &[]),
    el("Bi", 83, 208.980_399_1, &[]),
];

/// Isotope masses for labels that appear in screening libraries
static ISOTOPES: &[(&str, u16, f64)] = &[
    ("H", 1, 1.007_825_032_23),
    ("H", 2, 2.014_101_778_12),
    ("H", 3, 3.016_049_277_9),
    ("C", 11, 11.011_433_6),
    ("C", 12, 12.0),
    ("C", 13, 13.003_354_835_07),
    ("C", 14, 14.003_241_988_4),
    ("N", 14, 14.003_074_004_43),
    ("N", 15, 15.000_108_898_88),
    ("O", 16, 15.994_914_619_57),
    ("O", 17, 16.999_131_756_5),
    ("O", 18, 17.999_159_612_86),
    ("F", 18, 18.000_937_3),
    ("F", 19, 18.998_403_162_73),
    ("P", 31, 30.973_761_998_42),
    ("P", 32, 31.973_907_64),
    ("S", 32, 31.972_071_174_4),
    ("S", 33, 32.971_458_909_8),
    ("S", 34, 33.967_867_004),
    ("Cl", 35, 34.968_852_682),
    ("Cl", 37, 36.965_902_602),
    ("Br", 79, 78.918_337_6),
    ("Br", 81, 80.916_289_7),
    ("I", 123, 122.905_589),
    ("I", 124, 123.906_209_9),
    ("I", 125, 124.904_630_2),
    ("I", 127, 126.904_471_9),
    ("I", 131, 130.906_124_6),
];

/// Look up an element by its symbol (case-sensitive)
pub fn lookup(symbol: &str) -> Option<&'static Element> {
    ELEMENTS.iter().find(|e| e.symbol == symbol)
}

/// Mass of a specific isotope, if it is tabulated
pub fn isotope_mass(symbol: &str, mass_number: u16) -> Option<f64> {
    ISOTOPES
        .iter()
        .find(|(s, a, _)| *s == symbol && *a == mass_number)
        .map(|(_, _, mass)| *mass)
}
