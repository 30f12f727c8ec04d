use crate::charset::CodePointEncodingTable;

/// Index of a branch node in the trie arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchId(u32);

/// What one byte edge out of a branch leads to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slot {
    Vacant,
    Branch(BranchId),
    Leaf(char),
}

/// Byte-indexed prefix tree over every encoded sequence in a
/// [`CodePointEncodingTable`]. Each root-to-leaf path spells the bytes of one
/// scalar; the leaf stores that scalar.
///
/// Branches live in a flat arena addressed by [`BranchId`], the root is
/// always at index 0.
pub struct DecodeTrie {
    branches: Vec<Box<[Slot; 256]>>,
    leaves: usize,
    collisions: usize,
}

enum Insert {
    Added,
    Collided,
}

impl DecodeTrie {
    pub fn build(table: &CodePointEncodingTable) -> Self {
        let mut trie = Self {
            branches: vec![Box::new([Slot::Vacant; 256])],
            leaves: 0,
            collisions: 0,
        };

        for (ch, bytes) in table.iter() {
            match trie.insert(bytes, ch) {
                Insert::Added => trie.leaves += 1,
                Insert::Collided => trie.collisions += 1,
            }
        }

        trie
    }

    pub fn root(&self) -> BranchId {
        BranchId(0)
    }

    pub fn child(&self, at: BranchId, byte: u8) -> Slot {
        self.branches[at.0 as usize][byte as usize]
    }

    pub fn branch_count(&self) -> usize {
        self.branches.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves
    }

    /// Sequences that could not get a path of their own because a lower
    /// scalar already owned it or a prefix of it.
    pub fn collision_count(&self) -> usize {
        self.collisions
    }

    /// Walk a complete byte sequence from the root.
    pub fn lookup(&self, bytes: &[u8]) -> Option<char> {
        let mut node = self.root();
        for (i, &byte) in bytes.iter().enumerate() {
            match self.child(node, byte) {
                Slot::Leaf(ch) if i + 1 == bytes.len() => return Some(ch),
                Slot::Branch(next) => node = next,
                _ => return None,
            }
        }
        None
    }

    fn insert(&mut self, bytes: &[u8], ch: char) -> Insert {
        let Some((&last, prefix)) = bytes.split_last() else {
            return Insert::Collided;
        };

        let mut node = self.root();
        for &byte in prefix {
            node = match self.child(node, byte) {
                Slot::Branch(next) => next,
                Slot::Vacant => self.add_branch(node, byte),
                Slot::Leaf(_) => return Insert::Collided,
            };
        }

        let slot = &mut self.branches[node.0 as usize][last as usize];
        if *slot != Slot::Vacant {
            return Insert::Collided;
        }
        *slot = Slot::Leaf(ch);
        Insert::Added
    }

    fn add_branch(&mut self, parent: BranchId, byte: u8) -> BranchId {
        let id = BranchId(self.branches.len() as u32);
        self.branches.push(Box::new([Slot::Vacant; 256]));
        self.branches[parent.0 as usize][byte as usize] = Slot::Branch(id);
        id
    }
}
