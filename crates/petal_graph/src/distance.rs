use std::{
    cmp::Ordering,
    iter,
    marker::PhantomData,
    ops::{Add, AddAssign, Div},
};

pub trait DistanceUnit: Copy + Eq {
    const NANOMETERS_IN_UNIT: i64;
}

/// A length stored with nanometer precision, tagged with the unit it is read in.
///
/// Arithmetic between two units is allowed and keeps the unit of the left-hand side,
/// so segment lengths reported in kilometers can be accumulated directly into meters.
#[derive(Debug, Clone, Copy, Eq, Hash)]
pub struct Distance<T: DistanceUnit> {
    nm: i64,
    unit: PhantomData<T>,
}

macro_rules! create_distance_unit {
    ($struct_name:ident, $nm_conv:expr) => {
        #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
        pub struct $struct_name;

        impl DistanceUnit for $struct_name {
            const NANOMETERS_IN_UNIT: i64 = $nm_conv;
        }

        impl Distance<$struct_name> {
            #[inline(always)]
            pub fn value(&self) -> f64 {
                (self.nm as f64) / ($struct_name::NANOMETERS_IN_UNIT as f64)
            }
        }
    };
}

create_distance_unit!(Meters, 1_000_000_000);
create_distance_unit!(Kilometers, 1_000_000_000_000);

impl<T: DistanceUnit> Distance<T> {
    pub const ZERO: Distance<T> = Distance {
        nm: 0,
        unit: PhantomData,
    };

    /// Reads the same length in another unit.
    pub fn convert<U: DistanceUnit>(self) -> Distance<U> {
        Distance {
            nm: self.nm,
            unit: PhantomData,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.nm == 0
    }

    pub fn abs_diff(self, other: Distance<T>) -> Distance<T> {
        Distance {
            nm: (self.nm - other.nm).abs(),
            unit: PhantomData,
        }
    }
}

impl<T> Ord for Distance<T>
where
    T: DistanceUnit,
{
    fn cmp(&self, other: &Distance<T>) -> Ordering {
        self.nm.cmp(&other.nm)
    }
}

impl<T1, T2> PartialEq<Distance<T2>> for Distance<T1>
where
    T1: DistanceUnit,
    T2: DistanceUnit,
{
    fn eq(&self, other: &Distance<T2>) -> bool {
        self.nm == other.nm
    }
}

impl<T1, T2> PartialOrd<Distance<T2>> for Distance<T1>
where
    T1: DistanceUnit,
    T2: DistanceUnit,
{
    fn partial_cmp(&self, other: &Distance<T2>) -> Option<Ordering> {
        Some(self.nm.cmp(&other.nm))
    }
}

impl<T> From<f64> for Distance<T>
where
    T: DistanceUnit,
{
    fn from(value: f64) -> Self {
        Distance {
            nm: (value * (T::NANOMETERS_IN_UNIT as f64)).round() as i64,
            unit: PhantomData,
        }
    }
}

impl<T> From<i64> for Distance<T>
where
    T: DistanceUnit,
{
    fn from(value: i64) -> Self {
        Distance {
            nm: value * T::NANOMETERS_IN_UNIT,
            unit: PhantomData,
        }
    }
}

impl<T1, T2> Add<Distance<T2>> for Distance<T1>
where
    T1: DistanceUnit,
    T2: DistanceUnit,
{
    type Output = Distance<T1>;

    fn add(self, other: Distance<T2>) -> Distance<T1> {
        Distance {
            nm: self.nm + other.nm,
            unit: PhantomData,
        }
    }
}

impl<T1, T2> AddAssign<Distance<T2>> for Distance<T1>
where
    T1: DistanceUnit,
    T2: DistanceUnit,
{
    fn add_assign(&mut self, other: Distance<T2>) {
        self.nm += other.nm;
    }
}

impl<T1, T2> Div<Distance<T2>> for Distance<T1>
where
    T1: DistanceUnit,
    T2: DistanceUnit,
{
    type Output = f64;

    fn div(self, other: Distance<T2>) -> f64 {
        (self.nm as f64) / (other.nm as f64)
    }
}

impl<T: DistanceUnit> iter::Sum for Distance<T> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, distance| acc + distance)
    }
}

#[macro_export]
macro_rules! meters {
    ($num:expr) => {
        $crate::distance::Distance::<$crate::distance::Meters>::from($num)
    };
}

#[macro_export]
macro_rules! kilometers {
    ($num:expr) => {
        $crate::distance::Distance::<$crate::distance::Kilometers>::from($num)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_add_distances_together() {
        let result = meters!(10) + kilometers!(1);
        assert_eq!(result, meters!(1010));
    }

    #[test]
    fn should_accumulate_kilometers_into_meters() {
        let mut total = meters!(0);
        total += kilometers!(0.25);
        total += kilometers!(1.5);
        assert_eq!(total.value(), 1750.0);
    }

    #[test]
    fn should_divide_distance() {
        assert_eq!(meters!(100) / meters!(10), 10.0);
    }

    #[test]
    fn convert_keeps_length() {
        assert_eq!(kilometers!(2).convert::<Meters>().value(), 2000.0);
    }

    #[test]
    fn abs_diff_is_symmetric() {
        assert_eq!(meters!(30).abs_diff(meters!(100)), meters!(70));
        assert_eq!(meters!(100).abs_diff(meters!(30)), meters!(70));
    }
}
