//! Geographic modes: every point within a radius, or the N closest points.

use std::io::Write;

use neobase::geo::Neighbor;
use neobase::store::Store;

use super::output::{Output, NEAR_BANNER_WIDTH};
use crate::error::CliError;

/// Points of reference within `radius` km of each key, nearest first.
pub fn radius<W: Write>(
    store: &Store,
    keys: &[String],
    radius: f64,
    out: &mut Output<W>,
) -> Result<(), CliError> {
    for key in keys {
        out.banner(&format!("{}(+{}km)", key, radius), NEAR_BANNER_WIDTH)?;

        let mut hits: Vec<Neighbor> = store
            .find_near(key.as_str().into(), radius, store.keys())
            .collect();
        hits.sort();
        print_neighbors(store, &hits, out)?;
    }
    Ok(())
}

/// The `n` points of reference closest to each key.
pub fn closest<W: Write>(
    store: &Store,
    keys: &[String],
    n: usize,
    out: &mut Output<W>,
) -> Result<(), CliError> {
    for key in keys {
        out.banner(&format!("{}({} closest)", key, n), NEAR_BANNER_WIDTH)?;

        let hits = store.find_closest(key.as_str().into(), n, store.keys());
        print_neighbors(store, &hits, out)?;
    }
    Ok(())
}

fn print_neighbors<W: Write>(
    store: &Store,
    hits: &[Neighbor],
    out: &mut Output<W>,
) -> Result<(), CliError> {
    for hit in hits {
        out.por(store, &hit.key, Some(hit.distance))?;
    }
    Ok(())
}
