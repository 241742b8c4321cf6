// core/src/numeric.rs
use log::debug;

/// Avrunding til gitt antall desimaler.
pub trait RoundTo {
    fn round_to(self, dp: u32) -> f64;
}

impl RoundTo for f64 {
    #[inline]
    fn round_to(self, dp: u32) -> f64 {
        if dp == 0 { return self.round(); }
        let factor = 10_f64.powi(dp as i32);
        (self * factor).round() / factor
    }
}

/// Celle → tall. Tåler komma som desimalskille.
/// Tom celle og tekst som ikke er et tall gir `None`, aldri feil.
pub fn parse_number(cell: &str) -> Option<f64> {
    let s = cell.trim().replace(',', ".");
    if s.is_empty() {
        return None;
    }
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            debug!("ikke et tall: {:?}", cell);
            None
        }
    }
}

/// Snitt av verdiene som finnes. Tomt vindu → `None` (ikke 0).
pub fn mean_present<'a, I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = &'a Option<f64>>,
{
    let mut sum = 0.0f64;
    let mut cnt = 0usize;
    for v in values.into_iter().flatten() {
        sum += *v;
        cnt += 1;
    }
    if cnt == 0 { None } else { Some(sum / cnt as f64) }
}

/// Visning av kg-verdier: `80.0` skrives som "80.0", `82.35` som "82.35".
pub fn fmt_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_ignores_missing() {
        let xs = [Some(10.0), None, Some(14.0)];
        assert_eq!(mean_present(&xs), Some(12.0));
        assert_eq!(mean_present(&[None, None]), None);
    }

    #[test]
    fn fmt_keeps_one_decimal_for_whole_numbers() {
        assert_eq!(fmt_number(80.0), "80.0");
        assert_eq!(fmt_number(82.35), "82.35");
    }

    #[test]
    fn round_to_two_dp() {
        assert_eq!(12.346_f64.round_to(2), 12.35);
        assert_eq!(7.4_f64.round_to(0), 7.0);
    }
}
