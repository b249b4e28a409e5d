/// Union-Find (Disjoint Sets) data structure weighted by subtree size
///
/// `find` uses path halving, so lookups flatten the trees as they walk them.
/// The structure only ever becomes more connected; there is no split or removal.
use crate::error::{PercolationError, Result};

#[derive(Debug, Clone)]
pub struct DisjointSet {
    /// parent[i] = parent of i; roots are their own parent
    parent: Vec<usize>,
    /// size[i] = number of elements in the subtree rooted at i (only meaningful for roots)
    size: Vec<usize>,
    /// Number of components
    count: usize,
}

impl DisjointSet {
    /// Create a new DisjointSet with n singleton sets
    pub fn new(n: usize) -> Self {
        let parent = (0..n).collect();
        let size = vec![1; n];
        DisjointSet {
            parent,
            size,
            count: n,
        }
    }

    /// Like [`DisjointSet::new`], but reports an allocation failure instead of aborting
    pub fn try_new(n: usize) -> Result<Self> {
        let mut parent = Vec::new();
        let mut size = Vec::new();
        parent
            .try_reserve_exact(n)
            .and_then(|_| size.try_reserve_exact(n))
            .map_err(|e| {
                PercolationError::InvalidArgument(format!("cannot allocate {n} elements: {e}"))
            })?;
        parent.extend(0..n);
        size.resize(n, 1);
        Ok(DisjointSet {
            parent,
            size,
            count: n,
        })
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint components
    pub fn count(&self) -> usize {
        self.count
    }

    fn validate(&self, x: usize) -> Result<()> {
        if x >= self.parent.len() {
            return Err(PercolationError::index_out_of_range(
                x,
                0,
                self.parent.len().saturating_sub(1),
            ));
        }
        Ok(())
    }

    /// Find the canonical root of element x with path halving
    pub fn find(&mut self, x: usize) -> Result<usize> {
        self.validate(x)?;
        Ok(self.find_root(x))
    }

    /// Union the sets containing p and q. Returns `true` if they were in different sets.
    ///
    /// The smaller tree goes under the larger one; on a tie q's root goes under p's root.
    pub fn union(&mut self, p: usize, q: usize) -> Result<bool> {
        self.validate(p)?;
        self.validate(q)?;

        let root_p = self.find_root(p);
        let root_q = self.find_root(q);
        if root_p == root_q {
            return Ok(false);
        }

        if self.size[root_p] < self.size[root_q] {
            self.parent[root_p] = root_q;
            self.size[root_q] += self.size[root_p];
        } else {
            self.parent[root_q] = root_p;
            self.size[root_p] += self.size[root_q];
        }
        self.count -= 1;
        Ok(true)
    }

    /// Check if two elements are in the same set
    pub fn connected(&mut self, p: usize, q: usize) -> Result<bool> {
        self.validate(p)?;
        self.validate(q)?;
        Ok(self.find_root(p) == self.find_root(q))
    }

    /// Number of elements in the component containing x
    pub fn size_of(&mut self, x: usize) -> Result<usize> {
        let root = self.find(x)?;
        Ok(self.size[root])
    }

    /// Canonical root of every element, in element order
    pub fn roots(&mut self) -> Vec<usize> {
        (0..self.parent.len()).map(|i| self.find_root(i)).collect()
    }

    /// Unchecked `find`; x must be below `len()`
    pub(crate) fn find_root(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_singletons() {
        let mut uf = DisjointSet::new(5);
        assert_eq!(uf.len(), 5);
        assert_eq!(uf.count(), 5);
        for i in 0..5 {
            assert_eq!(uf.find(i).unwrap(), i);
            assert_eq!(uf.size_of(i).unwrap(), 1);
        }
    }

    #[test]
    fn test_union_by_size() {
        let mut uf = DisjointSet::new(6);

        // Equal sizes: q's root goes under p's root
        assert!(uf.union(0, 1).unwrap());
        assert_eq!(uf.find(1).unwrap(), 0);

        // Smaller tree (2) goes under the larger one (0) regardless of argument order
        assert!(uf.union(2, 0).unwrap());
        assert_eq!(uf.find(2).unwrap(), 0);
        assert_eq!(uf.size_of(2).unwrap(), 3);

        assert!(!uf.union(1, 2).unwrap());
        assert_eq!(uf.count(), 4);
    }

    #[test]
    fn test_redundant_union_keeps_count() {
        let mut uf = DisjointSet::new(3);
        uf.union(0, 1).unwrap();
        uf.union(1, 0).unwrap();
        uf.union(0, 0).unwrap();
        assert_eq!(uf.count(), 2);
    }

    #[test]
    fn test_path_halving_flattens() {
        let mut uf = DisjointSet::new(8);
        // Build a chain by always merging equal-size trees
        uf.union(0, 1).unwrap();
        uf.union(2, 3).unwrap();
        uf.union(0, 2).unwrap();
        uf.union(4, 5).unwrap();
        uf.union(6, 7).unwrap();
        uf.union(4, 6).unwrap();
        uf.union(0, 4).unwrap();

        assert_eq!(uf.find(7).unwrap(), 0);
        // After one find, 7 points at most two hops from the root
        let parent = uf.parent[7];
        assert!(parent == 0 || uf.parent[parent] == 0);
        assert_eq!(uf.size_of(7).unwrap(), 8);
    }

    #[test]
    fn test_out_of_range() {
        let mut uf = DisjointSet::new(4);
        assert!(uf.find(4).is_err());
        assert!(uf.union(0, 4).is_err());
        assert!(uf.union(9, 0).is_err());
        assert!(uf.connected(0, 4).is_err());
        assert_eq!(uf.count(), 4);
    }

    #[test]
    fn test_try_new() {
        let mut uf = DisjointSet::try_new(3).unwrap();
        assert_eq!(uf.count(), 3);
        assert_eq!(uf.roots(), vec![0, 1, 2]);
        assert!(DisjointSet::try_new(usize::MAX).is_err());
    }

    #[test]
    fn test_roots() {
        let mut uf = DisjointSet::new(4);
        uf.union(3, 1).unwrap();
        assert_eq!(uf.roots(), vec![0, 3, 2, 3]);
    }
}
