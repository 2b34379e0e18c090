/// Disjoint set forest (union-find) over the element indices `0..len`.
///
/// Each slot holds either a negative rank marker, in which case the slot is the root of its set,
/// or the index of its parent. The marker magnitude grows as a root's tree deepens; it only
/// decides which root goes under which on a union and is never exact after path compression.
#[derive(Debug, Clone)]
pub struct DisjointSets {
    sets: Vec<isize>,
    components: usize,
}

impl DisjointSets {
    /// Every element starts as a singleton set.
    pub fn new(elements_count: usize) -> DisjointSets {
        DisjointSets {
            sets: vec![-1; elements_count],
            components: elements_count,
        }
    }

    /// The number of disjoint sets currently in the partition.
    #[inline]
    pub fn size(&self) -> usize {
        self.components
    }

    /// The number of elements partitioned.
    #[inline]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// The root element representing the set containing `index`.
    /// Returns None if the index is not an element of the partition.
    ///
    /// Every element visited on the way up is re-pointed directly at the root.
    pub fn find(&mut self, index: usize) -> Option<usize> {
        if index >= self.sets.len() {
            return None;
        }

        let mut root = index;
        while self.sets[root] >= 0 {
            root = self.sets[root] as usize;
        }

        let mut current = index;
        while current != root {
            let parent = self.sets[current] as usize;
            self.sets[current] = root as isize;
            current = parent;
        }

        Some(root)
    }

    /// Merge the sets containing `a` and `b`.
    ///
    /// Returns true if two different sets were merged. Out of range indices and indices already
    /// in the same set leave the partition untouched and return false.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        if a >= self.sets.len() || b >= self.sets.len() {
            return false;
        }

        let (root_a, root_b) = match (self.find(a), self.find(b)) {
            (Some(root_a), Some(root_b)) => (root_a, root_b),
            _ => return false,
        };
        if root_a == root_b {
            return false;
        }

        if self.sets[root_b] < self.sets[root_a] {
            // b's tree is deeper
            self.sets[root_a] = root_b as isize;
        } else {
            if self.sets[root_a] == self.sets[root_b] {
                self.sets[root_a] -= 1;
            }
            self.sets[root_b] = root_a as isize;
        }

        self.components -= 1;
        true
    }

    /// Are `a` and `b` valid elements in the same set?
    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        match (self.find(a), self.find(b)) {
            (Some(root_a), Some(root_b)) => root_a == root_b,
            _ => false,
        }
    }
}
