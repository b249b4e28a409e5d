/// Wall-clock timing of union-find operations replayed from a pair list
///
/// Pair files hold whitespace-separated integers read two at a time, so line
/// breaks carry no meaning. How the pairs were generated is up to the caller.
use crate::error::Result as ModelResult;
use crate::union_find::DisjointSet;
use anyhow::{bail, Context, Result};
use log::debug;
use std::io::BufRead;
use std::time::{Duration, Instant};

/// Read element pairs
pub fn read_pairs<R: BufRead>(reader: R) -> Result<Vec<(usize, usize)>> {
    let mut values = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read line {}", i + 1))?;
        for token in line.split_whitespace() {
            let value: usize = token
                .parse()
                .with_context(|| format!("line {}: invalid element '{token}'", i + 1))?;
            values.push(value);
        }
    }

    if values.len() % 2 != 0 {
        bail!("pair list has an odd number of elements ({})", values.len());
    }
    Ok(values.chunks_exact(2).map(|p| (p[0], p[1])).collect())
}

/// Time `union` over every pair
pub fn time_unions(set: &mut DisjointSet, pairs: &[(usize, usize)]) -> ModelResult<Duration> {
    let start = Instant::now();
    for &(p, q) in pairs {
        set.union(p, q)?;
    }
    let elapsed = start.elapsed();
    debug!(
        "{} unions in {:?}, {} components left",
        pairs.len(),
        elapsed,
        set.count()
    );
    Ok(elapsed)
}

/// Time `connected` over every pair
pub fn time_connected(set: &mut DisjointSet, pairs: &[(usize, usize)]) -> ModelResult<Duration> {
    let start = Instant::now();
    let mut hits = 0usize;
    for &(p, q) in pairs {
        if set.connected(p, q)? {
            hits += 1;
        }
    }
    let elapsed = start.elapsed();
    debug!("{} connected queries in {:?}, {hits} connected", pairs.len(), elapsed);
    Ok(elapsed)
}
