//! Built-in unit data set
//!
//! One `Category` per measurable quantity. Each category documents its base
//! quantity; every unit's law converts to and from that base.

use super::law::ConversionLaw;
use super::registry::{Category, Registry, Unit};
use once_cell::sync::Lazy;
use std::f64::consts::PI;

// Shared physical constants
const INCH_M: f64 = 0.0254;
const FOOT_M: f64 = 0.3048;
const MILE_M: f64 = 1609.344;
const POUND_KG: f64 = 0.45359237;
const US_GALLON_L: f64 = 3.785411784;
const UK_GALLON_L: f64 = 4.54609;
const CUBIC_FOOT_L: f64 = 28.316846592;
const STANDARD_GRAVITY: f64 = 9.80665;
const POUND_FORCE_N: f64 = POUND_KG * STANDARD_GRAVITY;
const SQUARE_FOOT_M2: f64 = FOOT_M * FOOT_M;
const VACUUM_PERMEABILITY: f64 = 1.25663706212e-6;

// Rounded factors the long-standing core units have always displayed with
const MILE_ROUNDED_M: f64 = 1609.34;
const POUND_ROUNDED_KG: f64 = 0.453592;
const OUNCE_ROUNDED_KG: f64 = 0.0283495;
const SQUARE_FOOT_ROUNDED_M2: f64 = 0.092903;
const ACRE_ROUNDED_M2: f64 = 4046.86;
const US_GALLON_ROUNDED_L: f64 = 3.78541;

/// Process-wide registry, built and validated on first use
static BUILTIN_REGISTRY: Lazy<Registry> = Lazy::new(|| {
    // The data set is fixed at compile time and validated by tests
    Registry::from_categories(builtin_categories()).expect("built-in unit registry must be valid")
});

/// The canonical registry shared by every front end
pub fn builtin_registry() -> &'static Registry {
    &BUILTIN_REGISTRY
}

fn unit(id: &str, name: &str, law: ConversionLaw) -> Unit {
    Unit::new(id, name, law)
}

fn linear(id: &str, name: &str, factor: f64) -> Unit {
    Unit::new(id, name, ConversionLaw::linear(factor))
}

fn base(id: &str, name: &str) -> Unit {
    Unit::new(id, name, ConversionLaw::identity())
}

fn category(id: &str, name: &str, description: &str, units: Vec<Unit>) -> Category {
    Category::new(id, name, description, units)
}

/// All categories in display order
pub fn builtin_categories() -> Vec<Category> {
    vec![
        // Length (base: metre)
        category(
            "length",
            "Length",
            "Convert between different units of length.",
            vec![
                base("m", "Metre"),
                linear("km", "Kilometre", 1000.0),
                linear("cm", "Centimetre", 0.01),
                linear("mm", "Millimetre", 0.001),
                linear("um", "Micrometre", 1e-6),
                linear("nm", "Nanometre", 1e-9),
                linear("mi", "Mile", MILE_ROUNDED_M),
                linear("yd", "Yard", 0.9144),
                linear("ft", "Foot", FOOT_M),
                linear("in", "Inch", INCH_M),
                linear("nmi", "Nautical Mile", 1852.0),
            ],
        )
        .with_defaults("ft", "m"),
        // Mass (base: kilogram)
        category(
            "mass",
            "Mass",
            "Convert between different units of mass.",
            vec![
                base("kg", "Kilogram"),
                linear("g", "Gram", 0.001),
                linear("mg", "Milligram", 1e-6),
                linear("t", "Tonne", 1000.0),
                linear("lb", "Pound", POUND_ROUNDED_KG),
                linear("oz", "Ounce", OUNCE_ROUNDED_KG),
                linear("st", "Stone", POUND_KG * 14.0),
                linear("us-ton", "US Short Ton", POUND_KG * 2000.0),
            ],
        )
        .with_defaults("kg", "lb"),
        // Temperature (base: degree Celsius)
        category(
            "temperature",
            "Temperature",
            "Convert between different units of temperature.",
            vec![
                base("c", "Celsius"),
                unit("f", "Fahrenheit", ConversionLaw::affine(32.0, 5.0, 9.0)),
                unit("k", "Kelvin", ConversionLaw::affine(273.15, 1.0, 1.0)),
                unit("r", "Rankine", ConversionLaw::affine(491.67, 5.0, 9.0)),
            ],
        )
        .with_defaults("c", "f"),
        // Area (base: square metre)
        category(
            "area",
            "Area",
            "Convert between different units of area.",
            vec![
                base("sqm", "Square Metre"),
                linear("sqkm", "Square Kilometre", 1e6),
                linear("sqcm", "Square Centimetre", 1e-4),
                linear("sqft", "Square Foot", SQUARE_FOOT_ROUNDED_M2),
                linear("sqin", "Square Inch", INCH_M * INCH_M),
                linear("sqmi", "Square Mile", MILE_M * MILE_M),
                linear("acre", "Acre", ACRE_ROUNDED_M2),
                linear("ha", "Hectare", 10000.0),
            ],
        )
        .with_defaults("sqm", "sqft"),
        // Volume (base: litre)
        category(
            "volume",
            "Volume",
            "Convert between different units of volume.",
            vec![
                base("l", "Litre"),
                linear("ml", "Millilitre", 0.001),
                linear("m3", "Cubic Metre", 1000.0),
                linear("us-gal", "US Gallon", US_GALLON_ROUNDED_L),
                linear("uk-gal", "UK Gallon", UK_GALLON_L),
                linear("us-qt", "US Quart", US_GALLON_L / 4.0),
                linear("us-pt", "US Pint", US_GALLON_L / 8.0),
                linear("us-cup", "US Cup", US_GALLON_L / 16.0),
                linear("us-floz", "US Fluid Ounce", US_GALLON_L / 128.0),
                linear("cuft", "Cubic Foot", CUBIC_FOOT_L),
            ],
        )
        .with_defaults("l", "us-gal"),
        // Time (base: second)
        category(
            "time",
            "Time",
            "Convert between units of time, from milliseconds to years.",
            vec![
                linear("ms", "Millisecond", 0.001),
                base("s", "Second"),
                linear("min", "Minute", 60.0),
                linear("h", "Hour", 3600.0),
                linear("d", "Day", 86400.0),
                linear("wk", "Week", 604800.0),
                linear("mo", "Month (average)", 2629746.0),
                linear("yr", "Year (Gregorian)", 31556952.0),
            ],
        )
        .with_defaults("h", "min"),
        // Speed (base: metre per second)
        category(
            "speed",
            "Speed",
            "Convert between units of speed and velocity.",
            vec![
                base("mps", "Metre per Second"),
                unit("kph", "Kilometre per Hour", ConversionLaw::ratio(1000.0, 3600.0)),
                unit("mph", "Mile per Hour", ConversionLaw::ratio(MILE_M, 3600.0)),
                unit("kn", "Knot", ConversionLaw::ratio(1852.0, 3600.0)),
                linear("fps", "Foot per Second", FOOT_M),
            ],
        )
        .with_defaults("kph", "mph"),
        // Pressure (base: pascal)
        category(
            "pressure",
            "Pressure",
            "Convert between units of pressure.",
            vec![
                base("pa", "Pascal"),
                linear("kpa", "Kilopascal", 1000.0),
                linear("bar", "Bar", 100000.0),
                linear("mbar", "Millibar", 100.0),
                linear("psi", "Pound per Square Inch", POUND_FORCE_N / (INCH_M * INCH_M)),
                linear("atm", "Standard Atmosphere", 101325.0),
                linear("mmhg", "Millimetre of Mercury", 133.322387415),
                unit("torr", "Torr", ConversionLaw::ratio(101325.0, 760.0)),
            ],
        )
        .with_defaults("bar", "psi"),
        // Energy (base: joule)
        category(
            "energy",
            "Energy",
            "Convert between units of energy and work.",
            vec![
                base("j", "Joule"),
                linear("kj", "Kilojoule", 1000.0),
                linear("cal", "Calorie", 4.184),
                linear("kcal", "Kilocalorie", 4184.0),
                linear("wh", "Watt-hour", 3600.0),
                linear("kwh", "Kilowatt-hour", 3.6e6),
                linear("btu", "British Thermal Unit", 1055.05585262),
                linear("ev", "Electronvolt", 1.602176634e-19),
                linear("ft-lbf", "Foot-pound", FOOT_M * POUND_FORCE_N),
            ],
        )
        .with_defaults("kj", "kcal"),
        // Power (base: watt)
        category(
            "power",
            "Power",
            "Convert between units of power, including dBm.",
            vec![
                base("w", "Watt"),
                linear("kw", "Kilowatt", 1000.0),
                linear("mw", "Megawatt", 1e6),
                linear("hp", "Horsepower (mechanical)", 745.69987158227022),
                linear("ps", "Horsepower (metric)", 735.49875),
                unit("btu-h", "BTU per Hour", ConversionLaw::ratio(1055.05585262, 3600.0)),
                unit("dbm", "Decibel-milliwatt", ConversionLaw::logarithmic(0.001, 10.0)),
            ],
        )
        .with_defaults("kw", "hp"),
        // Force (base: newton)
        category(
            "force",
            "Force",
            "Convert between units of force.",
            vec![
                base("n", "Newton"),
                linear("kn", "Kilonewton", 1000.0),
                linear("dyn", "Dyne", 1e-5),
                linear("lbf", "Pound-force", POUND_FORCE_N),
                linear("kgf", "Kilogram-force", STANDARD_GRAVITY),
            ],
        )
        .with_defaults("n", "lbf"),
        // Angle (base: degree)
        category(
            "angle",
            "Angle",
            "Convert between units of plane angle.",
            vec![
                base("deg", "Degree"),
                unit("rad", "Radian", ConversionLaw::ratio(180.0, PI)),
                unit("grad", "Gradian", ConversionLaw::ratio(9.0, 10.0)),
                unit("arcmin", "Arcminute", ConversionLaw::ratio(1.0, 60.0)),
                unit("arcsec", "Arcsecond", ConversionLaw::ratio(1.0, 3600.0)),
                linear("turn", "Turn", 360.0),
            ],
        )
        .with_defaults("deg", "rad"),
        // Frequency (base: hertz)
        category(
            "frequency",
            "Frequency",
            "Convert between units of frequency.",
            vec![
                base("hz", "Hertz"),
                linear("khz", "Kilohertz", 1e3),
                linear("mhz", "Megahertz", 1e6),
                linear("ghz", "Gigahertz", 1e9),
                unit("rpm", "Revolutions per Minute", ConversionLaw::ratio(1.0, 60.0)),
            ],
        )
        .with_defaults("hz", "khz"),
        // Data storage (base: byte)
        category(
            "data-storage",
            "Data Storage",
            "Convert between decimal and binary units of digital storage.",
            vec![
                unit("bit", "Bit", ConversionLaw::ratio(1.0, 8.0)),
                base("byte", "Byte"),
                linear("kb", "Kilobyte", 1e3),
                linear("mb", "Megabyte", 1e6),
                linear("gb", "Gigabyte", 1e9),
                linear("tb", "Terabyte", 1e12),
                linear("kib", "Kibibyte", 1024.0),
                linear("mib", "Mebibyte", 1048576.0),
                linear("gib", "Gibibyte", 1073741824.0),
                linear("tib", "Tebibyte", 1099511627776.0),
            ],
        )
        .with_defaults("mb", "mib"),
        // Fuel consumption (base: kilometre per litre)
        category(
            "fuel-consumption",
            "Fuel Consumption",
            "Convert between fuel economy and fuel consumption figures.",
            vec![
                base("km-per-l", "Kilometre per Litre"),
                unit("l-p100km", "Litre per 100 km", ConversionLaw::reciprocal(100.0)),
                unit("mpg", "Mile per Gallon (US)", ConversionLaw::ratio(MILE_M / 1000.0, US_GALLON_L)),
                unit("mpg-uk", "Mile per Gallon (UK)", ConversionLaw::ratio(MILE_M / 1000.0, UK_GALLON_L)),
            ],
        )
        .with_defaults("l-p100km", "mpg"),
        // Acceleration (base: metre per second squared)
        category(
            "acceleration",
            "Acceleration",
            "Convert between units of acceleration.",
            vec![
                base("mps2", "Metre per Second Squared"),
                linear("g0", "Standard Gravity", STANDARD_GRAVITY),
                linear("fps2", "Foot per Second Squared", FOOT_M),
                linear("gal", "Gal", 0.01),
            ],
        )
        .with_defaults("mps2", "g0"),
        // Electric charge (base: coulomb)
        category(
            "charge",
            "Electric Charge",
            "Convert between units of electric charge and battery capacity.",
            vec![
                base("c", "Coulomb"),
                linear("mc", "Millicoulomb", 0.001),
                linear("ah", "Ampere-hour", 3600.0),
                linear("mah", "Milliampere-hour", 3.6),
            ],
        )
        .with_defaults("mah", "c"),
        // Density (base: kilogram per cubic metre)
        category(
            "density",
            "Density",
            "Convert between units of mass density.",
            vec![
                base("kg-m3", "Kilogram per Cubic Metre"),
                linear("g-cm3", "Gram per Cubic Centimetre", 1000.0),
                linear("g-l", "Gram per Litre", 1.0),
                linear("lb-ft3", "Pound per Cubic Foot", POUND_KG / (FOOT_M * FOOT_M * FOOT_M)),
                linear("lb-in3", "Pound per Cubic Inch", POUND_KG / (INCH_M * INCH_M * INCH_M)),
            ],
        )
        .with_defaults("g-cm3", "kg-m3"),
        // Mass flow (base: kilogram per second)
        category(
            "flow-mass",
            "Mass Flow Rate",
            "Convert between units of mass flow rate.",
            vec![
                base("kg-s", "Kilogram per Second"),
                unit("kg-h", "Kilogram per Hour", ConversionLaw::ratio(1.0, 3600.0)),
                linear("g-s", "Gram per Second", 0.001),
                linear("lb-s", "Pound per Second", POUND_KG),
                unit("lb-h", "Pound per Hour", ConversionLaw::ratio(POUND_KG, 3600.0)),
                unit("t-h", "Tonne per Hour", ConversionLaw::ratio(1000.0, 3600.0)),
            ],
        )
        .with_defaults("kg-h", "lb-h"),
        // Volumetric flow (base: cubic metre per second)
        category(
            "flow-volume",
            "Volumetric Flow Rate",
            "Convert between units of volumetric flow rate.",
            vec![
                base("m3-s", "Cubic Metre per Second"),
                unit("m3-h", "Cubic Metre per Hour", ConversionLaw::ratio(1.0, 3600.0)),
                linear("l-s", "Litre per Second", 0.001),
                unit("l-min", "Litre per Minute", ConversionLaw::ratio(0.001, 60.0)),
                unit("gpm", "US Gallon per Minute", ConversionLaw::ratio(US_GALLON_L / 1000.0, 60.0)),
                unit("cfm", "Cubic Foot per Minute", ConversionLaw::ratio(CUBIC_FOOT_L / 1000.0, 60.0)),
            ],
        )
        .with_defaults("l-min", "gpm"),
        // Illuminance (base: lux)
        category(
            "illumination",
            "Illuminance",
            "Convert between units of illuminance.",
            vec![
                base("lx", "Lux"),
                unit("fc", "Foot-candle", ConversionLaw::ratio(1.0, SQUARE_FOOT_M2)),
                linear("ph", "Phot", 10000.0),
            ],
        )
        .with_defaults("lx", "fc"),
        // Torque (base: newton metre)
        category(
            "torque",
            "Torque",
            "Convert between units of torque.",
            vec![
                base("nm", "Newton Metre"),
                linear("lbf-ft", "Pound-force Foot", POUND_FORCE_N * FOOT_M),
                linear("lbf-in", "Pound-force Inch", POUND_FORCE_N * INCH_M),
                linear("kgf-m", "Kilogram-force Metre", STANDARD_GRAVITY),
            ],
        )
        .with_defaults("nm", "lbf-ft"),
        // Electric current (base: ampere)
        category(
            "current",
            "Electric Current",
            "Convert between units of electric current.",
            vec![
                base("a", "Ampere"),
                linear("ma", "Milliampere", 0.001),
                linear("ua", "Microampere", 1e-6),
                linear("ka", "Kiloampere", 1000.0),
            ],
        )
        .with_defaults("a", "ma"),
        // Data transfer rate (base: bit per second)
        category(
            "data-transfer",
            "Data Transfer Rate",
            "Convert between units of bandwidth and throughput.",
            vec![
                base("bps", "Bit per Second"),
                linear("kbps", "Kilobit per Second", 1e3),
                linear("mbps", "Megabit per Second", 1e6),
                linear("gbps", "Gigabit per Second", 1e9),
                linear("byte-s", "Byte per Second", 8.0),
                linear("kbyte-s", "Kilobyte per Second", 8e3),
                linear("mbyte-s", "Megabyte per Second", 8e6),
            ],
        )
        .with_defaults("mbps", "mbyte-s"),
        // Image resolution (base: pixel per inch)
        category(
            "digital-image-resolution",
            "Digital Image Resolution",
            "Convert between pixel densities per inch and per centimetre.",
            vec![
                base("ppi", "Pixel per Inch"),
                base("dpi", "Dot per Inch"),
                linear("ppcm", "Pixel per Centimetre", 2.54),
            ],
        )
        .with_defaults("ppi", "ppcm"),
        // Luminance (base: candela per square metre)
        category(
            "luminance",
            "Luminance",
            "Convert between units of luminance.",
            vec![
                base("cd-m2", "Candela per Square Metre"),
                base("nit", "Nit"),
                unit("cd-ft2", "Candela per Square Foot", ConversionLaw::ratio(1.0, SQUARE_FOOT_M2)),
                unit("fl", "Foot-lambert", ConversionLaw::ratio(1.0, PI * SQUARE_FOOT_M2)),
                linear("sb", "Stilb", 10000.0),
            ],
        )
        .with_defaults("cd-m2", "fl"),
        // Magnetic permeability (base: henry per metre)
        category(
            "permeability",
            "Magnetic Permeability",
            "Convert between absolute and relative magnetic permeability.",
            vec![
                base("h-m", "Henry per Metre"),
                linear("uh-m", "Microhenry per Metre", 1e-6),
                linear("mu-r", "Relative Permeability", VACUUM_PERMEABILITY),
            ],
        )
        .with_defaults("mu-r", "h-m"),
        // Absorbed dose (base: gray)
        category(
            "radiation",
            "Radiation Absorbed Dose",
            "Convert between units of absorbed radiation dose.",
            vec![
                base("gy", "Gray"),
                linear("mgy", "Milligray", 0.001),
                linear("cgy", "Centigray", 0.01),
                linear("rad", "Rad", 0.01),
            ],
        )
        .with_defaults("gy", "rad"),
        // Sound pressure (base: pascal)
        category(
            "sound",
            "Sound Pressure",
            "Convert between sound pressure and sound pressure level in decibels.",
            vec![
                base("pa", "Pascal"),
                linear("mpa", "Millipascal", 0.001),
                unit("db-spl", "Decibel (SPL)", ConversionLaw::logarithmic(2e-5, 20.0)),
            ],
        )
        .with_defaults("db-spl", "pa"),
        // Typography (base: point)
        category(
            "typography",
            "Typography",
            "Convert between typographic units (CSS pixels at 96 per inch).",
            vec![
                base("pt", "Point"),
                linear("px", "Pixel", 0.75),
                linear("pica", "Pica", 12.0),
                linear("in", "Inch", 72.0),
                unit("mm", "Millimetre", ConversionLaw::ratio(72.0, 25.4)),
                linear("em", "Em (16px)", 12.0),
            ],
        )
        .with_defaults("px", "pt"),
        // Inductance (base: henry)
        category(
            "inductance",
            "Inductance",
            "Convert between units of electrical inductance.",
            vec![
                base("h", "Henry"),
                linear("mh", "Millihenry", 0.001),
                linear("uh", "Microhenry", 1e-6),
                linear("nh", "Nanohenry", 1e-9),
            ],
        )
        .with_defaults("mh", "uh"),
        // Conductance (base: siemens)
        category(
            "electric-conductance",
            "Electric Conductance",
            "Convert between units of electrical conductance.",
            vec![
                base("s", "Siemens"),
                linear("ms", "Millisiemens", 0.001),
                linear("us", "Microsiemens", 1e-6),
                base("mho", "Mho"),
            ],
        )
        .with_defaults("s", "ms"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::units::engine::convert;
    use crate::core::units::format::format_number;

    #[test]
    fn test_builtin_registry_is_valid() {
        let registry = Registry::from_categories(builtin_categories());
        assert!(registry.is_ok(), "{:?}", registry.err());
        assert_eq!(builtin_registry().len(), 32);
    }

    #[test]
    fn test_every_declared_default_resolves() {
        for category in builtin_registry().categories() {
            let from = category.default_from_unit().expect("default from");
            let to = category.default_to_unit().expect("default to");
            assert_ne!(from.id(), to.id(), "category {}", category.id());
        }
    }

    #[test]
    fn test_length_defaults_to_foot_and_metre() {
        let length = builtin_registry().find_category("length").unwrap();
        assert_eq!(length.default_from_unit().map(Unit::id), Some("ft"));
        assert_eq!(length.default_to_unit().map(Unit::id), Some("m"));
    }

    #[test]
    fn test_millibar_divides_on_the_way_back() {
        // A millibar is a hundred pascals, in both directions
        let pressure = builtin_registry().find_category("pressure").unwrap();
        let mbar = pressure.find_unit("mbar").unwrap();
        assert_eq!(mbar.to_base(1013.25), 101325.0);
        assert_eq!(mbar.from_base(101325.0), 1013.25);
        assert_eq!(mbar.from_base(mbar.to_base(7.5)), 7.5);
    }

    #[test]
    fn test_core_units_keep_rounded_factors() {
        let cases = [
            ("length", "mi", "m", "1609.3400"),
            ("mass", "oz", "g", "28.349500"),
            ("mass", "lb", "kg", "0.4535920"),
            ("area", "sqft", "sqm", "0.0929030"),
            ("area", "acre", "sqm", "4046.8600"),
            ("volume", "us-gal", "l", "3.7854100"),
        ];
        for (category, from, to, expected) in cases {
            let category = builtin_registry().find_category(category).unwrap();
            let result = convert(category, from, to, 1.0).unwrap();
            assert_eq!(format_number(result), expected, "{from} -> {to}");
        }
    }

    #[test]
    fn test_original_category_ids_are_present() {
        let registry = builtin_registry();
        for id in [
            "length", "mass", "temperature", "area", "volume", "time", "speed", "pressure",
            "energy", "power", "force", "angle", "frequency", "data-storage",
            "fuel-consumption", "acceleration", "charge", "density", "flow-mass",
            "flow-volume", "illumination", "torque", "current", "data-transfer",
            "digital-image-resolution", "luminance", "permeability", "radiation", "sound",
            "typography", "inductance", "electric-conductance",
        ] {
            assert!(registry.contains(id), "missing category {id}");
        }
    }
}
