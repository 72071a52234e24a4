//! Row-at-a-time conversion over slices.
//!
//! Each item gets its own [`GridResult`], so one bad row never hides the others. With the
//! `parallel` feature the rows are spread across the rayon thread pool; output order always
//! matches input order.
//!
//! The `try_` variants take items that may already have failed upstream (parsing, say) and
//! carry those failures through untouched.

use crate::base_point::BasePoint;
use crate::converter::Converter;
use crate::errors::GridResult;
use crate::point::{GridPoint, LatLng};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub fn latlng_to_grid_batch(
    converter: &Converter,
    coordinates: &[LatLng],
    base: &BasePoint,
) -> Vec<GridResult<GridPoint>> {
    #[cfg(feature = "parallel")]
    {
        coordinates
            .par_iter()
            .map(|c| converter.latlng_to_grid(*c, base))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        coordinates
            .iter()
            .map(|c| converter.latlng_to_grid(*c, base))
            .collect()
    }
}

pub fn grid_to_latlng_batch(
    converter: &Converter,
    offsets: &[GridPoint],
    base: &BasePoint,
) -> Vec<GridResult<LatLng>> {
    #[cfg(feature = "parallel")]
    {
        offsets
            .par_iter()
            .map(|o| converter.grid_to_latlng(*o, base))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        offsets
            .iter()
            .map(|o| converter.grid_to_latlng(*o, base))
            .collect()
    }
}

fn map_owned<T, U, F>(items: Vec<T>, f: F) -> Vec<U>
where
    T: Send,
    U: Send,
    F: Fn(T) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        items.into_par_iter().map(f).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        items.into_iter().map(f).collect()
    }
}

pub fn try_latlng_to_grid_batch(
    converter: &Converter,
    coordinates: Vec<GridResult<LatLng>>,
    base: &BasePoint,
) -> Vec<GridResult<GridPoint>> {
    map_owned(coordinates, |item| {
        item.and_then(|c| converter.latlng_to_grid(c, base))
    })
}

pub fn try_grid_to_latlng_batch(
    converter: &Converter,
    offsets: Vec<GridResult<GridPoint>>,
    base: &BasePoint,
) -> Vec<GridResult<LatLng>> {
    map_owned(offsets, |item| item.and_then(|o| converter.grid_to_latlng(o, base)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> BasePoint {
        BasePoint::new(LatLng::new(35.0, 135.0).unwrap(), GridPoint::ORIGIN).unwrap()
    }

    #[test]
    fn test_batch_isolates_failures() {
        let coords = [
            LatLng {
                latitude: 35.001,
                longitude: 135.0,
            },
            LatLng {
                latitude: 91.0,
                longitude: 135.0,
            },
            LatLng {
                latitude: 34.999,
                longitude: 135.0,
            },
        ];
        let results = latlng_to_grid_batch(&Converter::default(), &coords, &base());
        assert_eq!(results.len(), 3);
        assert!(results[0].as_ref().unwrap().y > 0.0);
        assert!(results[1].as_ref().unwrap_err().is_per_item());
        assert!(results[2].as_ref().unwrap().y < 0.0);
    }

    #[test]
    fn test_batch_preserves_order() {
        let offsets: Vec<GridPoint> = (0..64).map(|i| GridPoint::new(0.0, i as f64 * 100.0)).collect();
        let results = grid_to_latlng_batch(&Converter::default(), &offsets, &base());
        let latitudes: Vec<f64> = results.into_iter().map(|r| r.unwrap().latitude).collect();
        assert!(latitudes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_upstream_failures_pass_through() {
        use crate::errors::{GridError, ValidationKind};

        let inputs = vec![
            Ok(LatLng::new(35.001, 135.0).unwrap()),
            Err(GridError::validation("latitude", ValidationKind::Missing, "value is empty")),
            Ok(LatLng {
                latitude: 95.0,
                longitude: 0.0,
            }),
        ];
        let results = try_latlng_to_grid_batch(&Converter::default(), inputs, &base());
        assert!(results[0].as_ref().unwrap().y > 0.0);
        match &results[1] {
            Err(GridError::Validation { kind, .. }) => assert_eq!(*kind, ValidationKind::Missing),
            other => panic!("expected the upstream error, got {:?}", other),
        }
        assert!(results[2].as_ref().unwrap_err().is_validation());

        let offsets = vec![
            Ok(GridPoint::new(0.0, 100.0)),
            Err(GridError::validation("x", ValidationKind::Unparseable, "'a' is not a number")),
        ];
        let back = try_grid_to_latlng_batch(&Converter::default(), offsets, &base());
        assert!(back[0].as_ref().unwrap().latitude > 35.0);
        assert!(back[1].is_err());
    }

    #[test]
    fn test_empty_batch() {
        assert!(latlng_to_grid_batch(&Converter::default(), &[], &base()).is_empty());
    }
}
