//! Перекодировка интенсивности перед записью ("thalammerize").
//!
//! `v' = clamp((v + 1) * 65536 / 10, 0, 65535)`. Считается в f64, чтобы
//! умножение не переполнялось; в u16 значение сужается уже при записи.

use ndarray::{ArrayBase, DataMut, Dimension};

pub const THALAMMER_OFFSET: f64 = 1.0;
pub const THALAMMER_NUMERATOR: f64 = 65_536.0;
pub const THALAMMER_DENOMINATOR: f64 = 10.0;
pub const THALAMMER_MAX: f64 = 65_535.0;

/// Перекодирует одну выборку.
pub fn thalammerize_value(v: f64) -> f64 {
    ((v + THALAMMER_OFFSET) * THALAMMER_NUMERATOR / THALAMMER_DENOMINATOR)
        .clamp(0.0, THALAMMER_MAX)
}

/// Перекодирует весь массив на месте.
pub fn thalammerize<S, D>(image: &mut ArrayBase<S, D>)
where
    S: DataMut<Elem = f64>,
    D: Dimension,
{
    image.mapv_inplace(thalammerize_value);
}

/// Сужает выборку до u16: дробная часть отбрасывается, выход за
/// диапазон насыщается, NaN → 0.
pub fn narrow_sample(v: f64) -> u16 {
    v as u16
}
