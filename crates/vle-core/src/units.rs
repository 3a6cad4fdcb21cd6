// vle-core/src/units.rs

use uom::si::f64::{
    MolarVolume as UomMolarVolume, Pressure as UomPressure,
    ThermodynamicTemperature as UomThermodynamicTemperature,
};

// Public canonical unit types (SI, f64)
pub type MolarVolume = UomMolarVolume;
pub type Pressure = UomPressure;
pub type Temperature = UomThermodynamicTemperature;

#[inline]
pub fn kpa(v: f64) -> Pressure {
    use uom::si::pressure::kilopascal;
    Pressure::new::<kilopascal>(v)
}

#[inline]
pub fn k(v: f64) -> Temperature {
    use uom::si::thermodynamic_temperature::kelvin;
    Temperature::new::<kelvin>(v)
}

#[inline]
pub fn m3_per_mol(v: f64) -> MolarVolume {
    use uom::si::molar_volume::cubic_meter_per_mole;
    MolarVolume::new::<cubic_meter_per_mole>(v)
}

#[inline]
pub fn as_kpa(p: Pressure) -> f64 {
    use uom::si::pressure::kilopascal;
    p.get::<kilopascal>()
}

#[inline]
pub fn as_kelvin(t: Temperature) -> f64 {
    use uom::si::thermodynamic_temperature::kelvin;
    t.get::<kelvin>()
}

pub mod constants {
    /// Molar gas constant, J/(mol K).
    pub const R: f64 = 8.314_462_618;

    /// Zero of the Celsius scale, K.
    pub const CELSIUS_OFFSET: f64 = 273.15;

    /// kPa per mmHg.
    pub const KPA_PER_MMHG: f64 = 101.325 / 760.0;

    /// `R * T` in J/mol.
    #[inline]
    pub fn rt(t_k: f64) -> f64 {
        R * t_k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_smoke() {
        let _p = kpa(101.325);
        let _t = k(300.0);
        let _v = m3_per_mol(1.8e-5);
    }

    #[test]
    fn kpa_roundtrips() {
        assert!((as_kpa(kpa(42.5)) - 42.5).abs() < 1e-12);
        assert!((as_kelvin(k(351.4)) - 351.4).abs() < 1e-12);
    }

    #[test]
    fn one_atmosphere_in_mmhg() {
        assert!((constants::KPA_PER_MMHG * 760.0 - 101.325).abs() < 1e-12);
    }
}
