use rand::Rng;

use std::{
    cmp::Ordering,
    mem,
    ops::{Bound, DerefMut},
};

use crate::{
    llrb::{Color, Depth, Node, Stats},
    order::{Comparator, Natural},
    Result,
};

pub const MAX_TREE_DEPTH: usize = 100;

const ITER_LIMIT: usize = 100;

/// Oset manage a single instance of in-memory ordered-set index using
/// [left-leaning-red-black][llrb] tree, augmented with subtree-size for
/// order-statistic queries.
///
/// Every key is unique under the index's [Comparator]; inserting a key
/// that compares equal to a resident key is a no-op. Mutations and
/// queries run in `O(log n)` worst case, `rank` and `select` included,
/// paid for by a node-count field maintained in every subtree root.
///
/// [llrb]: https://en.wikipedia.org/wiki/Left-leaning_red-black_tree
pub struct Oset<K, C = Natural> {
    name: String,
    cmp: C,
    root: Option<Box<Node<K>>>,
}

impl<K, C> Clone for Oset<K, C>
where
    K: Clone,
    C: Clone,
{
    fn clone(&self) -> Oset<K, C> {
        Oset {
            name: self.name.clone(),
            cmp: self.cmp.clone(),
            root: self.root.clone(),
        }
    }
}

/// Different ways to construct a new Oset instance.
impl<K> Oset<K>
where
    K: Clone + Ord,
{
    /// Create an empty index in natural key order, identified by
    /// `name`. Applications can choose unique names.
    pub fn new<S>(name: S) -> Oset<K>
    where
        S: AsRef<str>,
    {
        Oset {
            name: name.as_ref().to_string(),
            cmp: Natural,
            root: None,
        }
    }

    /// Create a new index and load it with keys from `iter`. Keys must
    /// be unique, a duplicate aborts the load.
    pub fn load_from<S, I>(name: S, iter: I) -> Result<Oset<K>>
    where
        S: AsRef<str>,
        I: Iterator<Item = K>,
    {
        let mut index = Oset::new(name);
        for (off, key) in iter.enumerate() {
            if index.insert(key).is_some() {
                return err_at!(InvalidInput, msg: "load_from: duplicate key at offset {}", off);
            }
        }
        Ok(index)
    }
}

/// Maintenance API.
impl<K, C> Oset<K, C> {
    /// Create an empty index ordered by `cmp`, identified by `name`.
    /// Any closure `Fn(&K, &K) -> Ordering` doubles up as a comparator.
    pub fn with_ordering<S>(name: S, cmp: C) -> Oset<K, C>
    where
        S: AsRef<str>,
    {
        Oset {
            name: name.as_ref().to_string(),
            cmp,
            root: None,
        }
    }

    /// Identify this instance. Applications can choose unique names
    /// while creating Oset instances.
    pub fn id(&self) -> String {
        self.name.clone()
    }

    /// Return number of keys in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        size_of(self.root.as_deref())
    }

    /// Check whether this index is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Return quickly with basic statistics. For black-count and depth
    /// statistics refer to the [validate][Oset::validate] call.
    pub fn stats(&self) -> Stats {
        Stats::new(&self.name, self.len(), mem::size_of::<Node<K>>())
    }
}

/// Write operations on Oset instance.
impl<K, C> Oset<K, C>
where
    K: Clone,
    C: Comparator<K>,
{
    /// Insert `key` into the index. If an equal key is already
    /// resident, nothing changes and a copy of the resident key is
    /// returned.
    pub fn insert(&mut self, key: K) -> Option<K> {
        let root = self.root.take();
        match self.do_insert(root, key) {
            (Some(mut root), old) => {
                root.set_black();
                self.root = Some(root);
                old
            }
            (None, _) => unreachable!(),
        }
    }

    /// Remove `key` from the index and return it. For a missing key
    /// delete is effectively a no-op.
    pub fn delete(&mut self, key: &K) -> Option<K> {
        let root = self.root.take();
        let (root, old) = self.do_delete(root, key);
        self.root = root.map(|mut root| {
            root.set_black();
            root
        });
        old
    }

    /// Remove the smallest key and return it, `None` when the index is
    /// empty.
    pub fn delete_min(&mut self) -> Option<K> {
        let (root, old) = do_delete_min(self.root.take());
        self.root = root.map(|mut root| {
            root.set_black();
            root
        });
        old.map(|node| node.key)
    }

    /// Remove the largest key and return it, `None` when the index is
    /// empty.
    pub fn delete_max(&mut self) -> Option<K> {
        let (root, old) = do_delete_max(self.root.take());
        self.root = root.map(|mut root| {
            root.set_black();
            root
        });
        old.map(|node| node.key)
    }

    fn do_insert(&self, node: Option<Box<Node<K>>>, key: K) -> (Option<Box<Node<K>>>, Option<K>) {
        let node = match node {
            Some(node) => node,
            None => return (Some(Node::new(key, Color::Red)), None),
        };

        let mut node = walkdown_rot23(node);

        match self.cmp.compare(node.as_key(), &key) {
            Ordering::Greater => {
                let (left, old) = self.do_insert(node.left.take(), key);
                node.left = left;
                (Some(walkuprot_23(node)), old)
            }
            Ordering::Less => {
                let (right, old) = self.do_insert(node.right.take(), key);
                node.right = right;
                (Some(walkuprot_23(node)), old)
            }
            Ordering::Equal => {
                let old = node.key.clone();
                (Some(walkuprot_23(node)), Some(old))
            }
        }
    }

    fn do_delete(&self, node: Option<Box<Node<K>>>, key: &K) -> (Option<Box<Node<K>>>, Option<K>) {
        let mut node = match node {
            None => return (None, None),
            Some(node) => node,
        };

        if let Ordering::Greater = self.cmp.compare(node.as_key(), key) {
            if node.left.is_none() {
                (Some(node), None)
            } else {
                let ok = !is_red(node.as_left_ref())
                    && !is_red(node.left.as_ref().unwrap().as_left_ref());
                if ok {
                    node = move_red_left(node);
                }
                let (left, old) = self.do_delete(node.left.take(), key);
                node.left = left;
                (Some(fixup(node)), old)
            }
        } else {
            if is_red(node.as_left_ref()) {
                node = rotate_right(node);
            }

            if self.cmp.compare(node.as_key(), key) == Ordering::Equal && node.right.is_none() {
                return (None, Some(node.key));
            }

            let ok = node.right.is_some() && !is_red(node.as_right_ref());
            if ok && !is_red(node.right.as_ref().unwrap().as_left_ref()) {
                node = move_red_right(node);
            }

            if self.cmp.compare(node.as_key(), key) == Ordering::Equal {
                // matched node is replaced with its in-order successor,
                // carved out of the right subtree.
                let (right, sub_node) = do_delete_min(node.right.take());
                node.right = right;
                let mut newnode = match sub_node {
                    Some(sub_node) => Box::new(sub_node),
                    None => panic!("do_delete(): fatal logic, call the programmer"),
                };
                newnode.left = node.left.take();
                newnode.right = node.right.take();
                newnode.color = node.color;
                (Some(fixup(newnode)), Some(node.key))
            } else {
                let (right, old) = self.do_delete(node.right.take(), key);
                node.right = right;
                (Some(fixup(node)), old)
            }
        }
    }
}

/// Read operations on Oset instance.
impl<K, C> Oset<K, C>
where
    K: Clone,
    C: Comparator<K>,
{
    /// Get a copy of `key` from the index, `None` if the key is not
    /// resident.
    pub fn get(&self, key: &K) -> Option<K> {
        let nref = self.do_get(self.root.as_deref(), key)?;
        Some(nref.key.clone())
    }

    /// Check whether `key` is resident in the index.
    pub fn contains(&self, key: &K) -> bool {
        self.do_get(self.root.as_deref(), key).is_some()
    }

    /// Return the smallest key, `None` when the index is empty.
    pub fn min(&self) -> Option<K> {
        let mut nref = self.root.as_deref()?;
        while let Some(left) = nref.as_left_ref() {
            nref = left;
        }
        Some(nref.key.clone())
    }

    /// Return the largest key, `None` when the index is empty.
    pub fn max(&self) -> Option<K> {
        let mut nref = self.root.as_deref()?;
        while let Some(right) = nref.as_right_ref() {
            nref = right;
        }
        Some(nref.key.clone())
    }

    /// Return the largest resident key less-than-or-equal to `key`.
    pub fn floor(&self, key: &K) -> Option<K> {
        let nref = self.do_floor(self.root.as_deref(), key)?;
        Some(nref.key.clone())
    }

    /// Return the smallest resident key greater-than-or-equal to `key`.
    pub fn ceil(&self, key: &K) -> Option<K> {
        let nref = self.do_ceil(self.root.as_deref(), key)?;
        Some(nref.key.clone())
    }

    /// Return the number of resident keys strictly less than `key`,
    /// the key's zero-based position in sort order. `key` itself need
    /// not be resident.
    pub fn rank(&self, key: &K) -> usize {
        self.do_rank(self.root.as_deref(), key)
    }

    /// Return the key at zero-based position `off` in sort order, the
    /// inverse of [rank][Oset::rank]. `off` must be within
    /// `0..len()`, else InvalidInput error.
    pub fn select(&self, off: usize) -> Result<K> {
        if off >= self.len() {
            return err_at!(InvalidInput, msg: "select: offset {} out of bounds {}", off, self.len());
        }
        let nref = do_select(self.root.as_deref(), off)?;
        Ok(nref.key.clone())
    }

    /// Return the number of resident keys in the closed interval
    /// `[low, high]`, InvalidInput error when `low` is greater than
    /// `high`. Neither bound needs to be resident.
    pub fn range_size(&self, low: &K, high: &K) -> Result<usize> {
        if let Ordering::Greater = self.cmp.compare(low, high) {
            return err_at!(InvalidInput, msg: "range_size: low bound beyond high bound");
        }
        let n = self.rank(high) - self.rank(low);
        Ok(if self.contains(high) { n + 1 } else { n })
    }

    /// Return a uniformly random resident key, `None` when the index
    /// is empty.
    pub fn random<R>(&self, rng: &mut R) -> Option<K>
    where
        R: Rng,
    {
        if self.is_empty() {
            return None;
        }
        let off = rng.gen_range(0..self.len());
        let nref = do_select(self.root.as_deref(), off).ok()?;
        Some(nref.key.clone())
    }

    /// Return an iterator over all keys in this instance, in sort
    /// order. Keys are scanned in batches, so the iterator stays cheap
    /// for partial consumption.
    pub fn iter(&self) -> Iter<K, C> {
        Iter {
            set: self,
            node_iter: vec![].into_iter(),
            after_key: Bound::Unbounded,
            limit: ITER_LIMIT,
            fin: false,
        }
    }

    /// Range over all keys from low to high, in sort order. When both
    /// bounds carry keys the low bound must not be beyond the high
    /// bound, else InvalidInput error. Use [Range::rev] for descending
    /// order.
    pub fn range(&self, low: Bound<K>, high: Bound<K>) -> Result<Range<K, C>> {
        let ok = match (&low, &high) {
            (Bound::Unbounded, _) | (_, Bound::Unbounded) => true,
            (Bound::Included(l), Bound::Included(h))
            | (Bound::Included(l), Bound::Excluded(h))
            | (Bound::Excluded(l), Bound::Included(h))
            | (Bound::Excluded(l), Bound::Excluded(h)) => {
                self.cmp.compare(l, h) != Ordering::Greater
            }
        };
        if !ok {
            return err_at!(InvalidInput, msg: "range: low bound beyond high bound");
        }

        Ok(Range {
            set: self,
            node_iter: vec![].into_iter(),
            low,
            high,
            limit: ITER_LIMIT,
            fin: false,
        })
    }

    /// Validate the tree against its invariants:
    ///
    /// * Root node is always black.
    /// * No red link leaning right, no consecutive red links.
    /// * Number of black links is same on the left arm and right arm.
    /// * Keys are in sort order under the index's comparator.
    /// * Subtree node-count is in sync at every node.
    /// * Maximum depth does not exceed [MAX_TREE_DEPTH].
    ///
    /// Additionally return statistics on the tree, black-count and
    /// leaf-depth histogram included.
    pub fn validate(&self) -> Result<Stats> {
        let root = self.root.as_deref();
        if is_red(root) {
            return err_at!(Fatal, msg: "validate: root node must be black");
        }

        let mut depths = Depth::default();
        let blacks = self.validate_tree(root, is_red(root), 0, 0, &mut depths)?;

        let mut stats = self.stats();
        stats.blacks = Some(blacks);
        stats.depths = Some(depths);
        Ok(stats)
    }

    fn do_get<'a>(&self, mut node: Option<&'a Node<K>>, key: &K) -> Option<&'a Node<K>> {
        while let Some(nref) = node {
            node = match self.cmp.compare(nref.as_key(), key) {
                Ordering::Less => nref.as_right_ref(),
                Ordering::Greater => nref.as_left_ref(),
                Ordering::Equal => return Some(nref),
            };
        }
        None
    }

    fn do_floor<'a>(&self, node: Option<&'a Node<K>>, key: &K) -> Option<&'a Node<K>> {
        let nref = node?;
        match self.cmp.compare(key, nref.as_key()) {
            Ordering::Equal => Some(nref),
            // the floor can only be in the left subtree, everything to
            // the right is larger than key.
            Ordering::Less => self.do_floor(nref.as_left_ref(), key),
            // this node qualifies, unless the right subtree turns up a
            // closer candidate.
            Ordering::Greater => self.do_floor(nref.as_right_ref(), key).or(Some(nref)),
        }
    }

    fn do_ceil<'a>(&self, node: Option<&'a Node<K>>, key: &K) -> Option<&'a Node<K>> {
        let nref = node?;
        match self.cmp.compare(key, nref.as_key()) {
            Ordering::Equal => Some(nref),
            Ordering::Greater => self.do_ceil(nref.as_right_ref(), key),
            Ordering::Less => self.do_ceil(nref.as_left_ref(), key).or(Some(nref)),
        }
    }

    fn do_rank(&self, node: Option<&Node<K>>, key: &K) -> usize {
        let nref = match node {
            Some(nref) => nref,
            None => return 0,
        };
        match self.cmp.compare(key, nref.as_key()) {
            Ordering::Less => self.do_rank(nref.as_left_ref(), key),
            Ordering::Greater => {
                1 + size_of(nref.as_left_ref()) + self.do_rank(nref.as_right_ref(), key)
            }
            Ordering::Equal => size_of(nref.as_left_ref()),
        }
    }

    fn validate_tree(
        &self,
        node: Option<&Node<K>>,
        fromred: bool,
        mut nb: usize,
        depth: usize,
        depths: &mut Depth,
    ) -> Result<usize> {
        let nref = match node {
            Some(nref) => nref,
            None => {
                depths.sample(depth);
                return Ok(nb);
            }
        };

        let red = is_red(node);
        if fromred && red {
            return err_at!(ConsecutiveReds, msg: "two red links in a row at depth {}", depth);
        }
        if is_red(nref.as_right_ref()) {
            return err_at!(Fatal, msg: "red link leaning right at depth {}", depth);
        }
        if depth > MAX_TREE_DEPTH {
            return err_at!(Fatal, msg: "tree exceeds maximum depth {}", depth);
        }

        // confirm sort order in the tree.
        if let Some(left) = nref.as_left_ref() {
            if self.cmp.compare(left.as_key(), nref.as_key()) != Ordering::Less {
                return err_at!(SortError, msg: "left key not lesser at depth {}", depth);
            }
        }
        if let Some(right) = nref.as_right_ref() {
            if self.cmp.compare(right.as_key(), nref.as_key()) != Ordering::Greater {
                return err_at!(SortError, msg: "right key not greater at depth {}", depth);
            }
        }

        // confirm subtree node-count augmentation.
        let size = 1 + size_of(nref.as_left_ref()) + size_of(nref.as_right_ref());
        if nref.size != size {
            return err_at!(Fatal, msg: "subtree size {} expected {}", nref.size, size);
        }

        if !red {
            nb += 1;
        }
        let lb = self.validate_tree(nref.as_left_ref(), red, nb, depth + 1, depths)?;
        let rb = self.validate_tree(nref.as_right_ref(), red, nb, depth + 1, depths)?;
        if lb != rb {
            return err_at!(UnbalancedBlacks, msg: "left {} right {}", lb, rb);
        }
        Ok(lb)
    }
}

#[inline]
fn is_red<K>(node: Option<&Node<K>>) -> bool {
    node.map_or(false, |node| !node.is_black())
}

#[inline]
fn is_black<K>(node: Option<&Node<K>>) -> bool {
    node.map_or(true, Node::is_black)
}

#[inline]
fn size_of<K>(node: Option<&Node<K>>) -> usize {
    node.map_or(0, |node| node.size)
}

fn do_select<'a, K>(node: Option<&'a Node<K>>, off: usize) -> Result<&'a Node<K>> {
    let nref = match node {
        Some(nref) => nref,
        None => return err_at!(Fatal, msg: "do_select(): offset beyond the tree"),
    };
    let lsize = size_of(nref.as_left_ref());
    match off.cmp(&lsize) {
        Ordering::Less => do_select(nref.as_left_ref(), off),
        Ordering::Greater => do_select(nref.as_right_ref(), off - lsize - 1),
        Ordering::Equal => Ok(nref),
    }
}

// return (root, deleted-node)
fn do_delete_min<K>(node: Option<Box<Node<K>>>) -> (Option<Box<Node<K>>>, Option<Node<K>>) {
    let mut node = match node {
        None => return (None, None),
        Some(node) => node,
    };

    if node.left.is_none() {
        return (None, Some(*node));
    }

    let left = node.as_left_ref();
    if !is_red(left) && !is_red(left.unwrap().as_left_ref()) {
        node = move_red_left(node);
    }
    let (left, old) = do_delete_min(node.left.take());
    node.left = left;
    (Some(fixup(node)), old)
}

// return (root, deleted-node)
fn do_delete_max<K>(node: Option<Box<Node<K>>>) -> (Option<Box<Node<K>>>, Option<Node<K>>) {
    let mut node = match node {
        None => return (None, None),
        Some(node) => node,
    };

    if is_red(node.as_left_ref()) {
        node = rotate_right(node);
    }
    if node.right.is_none() {
        return (None, Some(*node));
    }

    let right = node.as_right_ref();
    if !is_red(right) && !is_red(right.unwrap().as_left_ref()) {
        node = move_red_right(node);
    }
    let (right, old) = do_delete_max(node.right.take());
    node.right = right;
    (Some(fixup(node)), old)
}

//--------- rotation routines for 2-3 algorithm ----------------

fn walkdown_rot23<K>(node: Box<Node<K>>) -> Box<Node<K>> {
    node
}

fn walkuprot_23<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    if is_red(node.as_right_ref()) && !is_red(node.as_left_ref()) {
        node = rotate_left(node);
    }
    let left = node.as_left_ref();
    if is_red(left) && is_red(left.unwrap().as_left_ref()) {
        node = rotate_right(node);
    }
    if is_red(node.as_left_ref()) && is_red(node.as_right_ref()) {
        flip(node.deref_mut());
    }
    node.update_size();
    node
}

//              (i)                       (i)
//               |                         |
//              node                       x
//              /  \                      / \
//             /    (r)                 (r)  \
//            /       \                 /     \
//          left       x             node      xr
//                    / \            /  \
//                  xl   xr       left   xl
//
fn rotate_left<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    if is_black(node.as_right_ref()) {
        panic!("rotate_left(): rotating a black link ? call the programmer");
    }
    let mut x = node.right.take().unwrap();
    node.right = x.left.take();
    x.color = node.color;
    node.set_red();
    // the risen node owns the same subtree, the sunk node recounts.
    x.size = node.size;
    node.update_size();
    x.left = Some(node);
    x
}

//              (i)                       (i)
//               |                         |
//              node                       x
//              /  \                      / \
//            (r)   \                   (r)  \
//           /       \                 /      \
//          x       right             xl      node
//         / \                                / \
//       xl   xr                             xr  right
//
fn rotate_right<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    if is_black(node.as_left_ref()) {
        panic!("rotate_right(): rotating a black link ? call the programmer");
    }
    let mut x = node.left.take().unwrap();
    node.left = x.right.take();
    x.color = node.color;
    node.set_red();
    x.size = node.size;
    node.update_size();
    x.right = Some(node);
    x
}

//        (x)                   (!x)
//         |                     |
//        node                  node
//        / \                   / \
//      (y) (z)              (!y) (!z)
//     /      \              /      \
//   left    right         left    right
//
fn flip<K>(node: &mut Node<K>) {
    node.left.as_mut().unwrap().toggle_link();
    node.right.as_mut().unwrap().toggle_link();
    node.toggle_link();
}

fn fixup<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    node = if is_red(node.as_right_ref()) {
        rotate_left(node)
    } else {
        node
    };
    node = {
        let left = node.as_left_ref();
        if is_red(left) && is_red(left.unwrap().as_left_ref()) {
            rotate_right(node)
        } else {
            node
        }
    };
    if is_red(node.as_left_ref()) && is_red(node.as_right_ref()) {
        flip(node.deref_mut());
    }
    node.update_size();
    node
}

fn move_red_left<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    flip(node.deref_mut());
    if is_red(node.right.as_ref().unwrap().as_left_ref()) {
        node.right = Some(rotate_right(node.right.take().unwrap()));
        node = rotate_left(node);
        flip(node.deref_mut());
    }
    node
}

fn move_red_right<K>(mut node: Box<Node<K>>) -> Box<Node<K>> {
    flip(node.deref_mut());
    if is_red(node.left.as_ref().unwrap().as_left_ref()) {
        node = rotate_right(node);
        flip(node.deref_mut());
    }
    node
}

/// Iterator type, to do full scan of keys in sort order.
pub struct Iter<'a, K, C = Natural> {
    set: &'a Oset<K, C>,
    node_iter: std::vec::IntoIter<K>,
    after_key: Bound<K>,
    limit: usize,
    fin: bool,
}

impl<'a, K, C> Iter<'a, K, C>
where
    K: Clone,
    C: Comparator<K>,
{
    fn scan_iter(
        &self,
        node: Option<&Node<K>>,
        acc: &mut Vec<K>, // accumulator for batch of keys
    ) -> bool {
        let nref = match node {
            None => return true,
            Some(nref) => nref,
        };

        let (left, right) = (nref.as_left_ref(), nref.as_right_ref());
        match &self.after_key {
            Bound::Included(akey) | Bound::Excluded(akey) => {
                if self.set.cmp.compare(nref.as_key(), akey) != Ordering::Greater {
                    return self.scan_iter(right, acc);
                }
            }
            Bound::Unbounded => (),
        }

        if !self.scan_iter(left, acc) {
            return false;
        }

        acc.push(nref.key.clone());
        if acc.len() >= self.limit {
            return false;
        }

        self.scan_iter(right, acc)
    }
}

impl<'a, K, C> Iterator for Iter<'a, K, C>
where
    K: Clone,
    C: Comparator<K>,
{
    type Item = K;

    fn next(&mut self) -> Option<K> {
        if self.fin {
            return None;
        }

        let item = self.node_iter.next();
        if item.is_some() {
            return item;
        }

        let mut acc: Vec<K> = Vec::with_capacity(self.limit);
        self.scan_iter(self.set.root.as_deref(), &mut acc);

        if acc.is_empty() {
            self.fin = true;
            None
        } else {
            self.after_key = Bound::Excluded(acc.last().unwrap().clone());
            self.node_iter = acc.into_iter();
            self.node_iter.next()
        }
    }
}

/// Iterator type, to scan keys between a low bound and a high bound, in
/// sort order.
pub struct Range<'a, K, C = Natural> {
    set: &'a Oset<K, C>,
    node_iter: std::vec::IntoIter<K>,
    low: Bound<K>,
    high: Bound<K>,
    limit: usize,
    fin: bool,
}

impl<'a, K, C> Range<'a, K, C>
where
    K: Clone,
    C: Comparator<K>,
{
    /// Flip this range into a [Reverse], scanning the same window from
    /// the high bound down to the low bound.
    pub fn rev(self) -> Reverse<'a, K, C> {
        Reverse {
            set: self.set,
            node_iter: vec![].into_iter(),
            low: self.low,
            high: self.high,
            limit: self.limit,
            fin: false,
        }
    }

    fn range_iter(
        &self,
        node: Option<&Node<K>>,
        acc: &mut Vec<K>, // accumulator for batch of keys
    ) -> bool {
        let nref = match node {
            None => return true,
            Some(nref) => nref,
        };

        let (left, right) = (nref.as_left_ref(), nref.as_right_ref());
        match &self.low {
            Bound::Included(low)
                if self.set.cmp.compare(nref.as_key(), low) == Ordering::Less =>
            {
                return self.range_iter(right, acc);
            }
            Bound::Excluded(low)
                if self.set.cmp.compare(nref.as_key(), low) != Ordering::Greater =>
            {
                return self.range_iter(right, acc);
            }
            _ => (),
        }

        if !self.range_iter(left, acc) {
            return false;
        }

        acc.push(nref.key.clone());
        if acc.len() >= self.limit {
            return false;
        }

        self.range_iter(right, acc)
    }
}

impl<'a, K, C> Iterator for Range<'a, K, C>
where
    K: Clone,
    C: Comparator<K>,
{
    type Item = K;

    fn next(&mut self) -> Option<K> {
        if self.fin {
            return None;
        }

        let mut item = self.node_iter.next();
        if item.is_none() {
            let mut acc: Vec<K> = Vec::with_capacity(self.limit);
            self.range_iter(self.set.root.as_deref(), &mut acc);
            item = if acc.is_empty() {
                None
            } else {
                self.low = Bound::Excluded(acc.last().unwrap().clone());
                self.node_iter = acc.into_iter();
                self.node_iter.next()
            };
        }

        // handle upper limit
        let key = match item {
            Some(key) => key,
            None => {
                self.fin = true;
                return None;
            }
        };
        match &self.high {
            Bound::Unbounded => Some(key),
            Bound::Included(hg)
                if self.set.cmp.compare(&key, hg) != Ordering::Greater =>
            {
                Some(key)
            }
            Bound::Excluded(hg) if self.set.cmp.compare(&key, hg) == Ordering::Less => {
                Some(key)
            }
            _ => {
                self.fin = true;
                None
            }
        }
    }
}

/// Iterator type, to scan keys between a high bound and a low bound, in
/// reverse sort order.
pub struct Reverse<'a, K, C = Natural> {
    set: &'a Oset<K, C>,
    node_iter: std::vec::IntoIter<K>,
    low: Bound<K>,
    high: Bound<K>,
    limit: usize,
    fin: bool,
}

impl<'a, K, C> Reverse<'a, K, C>
where
    K: Clone,
    C: Comparator<K>,
{
    fn reverse_iter(
        &self,
        node: Option<&Node<K>>,
        acc: &mut Vec<K>, // accumulator for batch of keys
    ) -> bool {
        let nref = match node {
            None => return true,
            Some(nref) => nref,
        };

        let (left, right) = (nref.as_left_ref(), nref.as_right_ref());
        match &self.high {
            Bound::Included(high)
                if self.set.cmp.compare(nref.as_key(), high) == Ordering::Greater =>
            {
                return self.reverse_iter(left, acc);
            }
            Bound::Excluded(high)
                if self.set.cmp.compare(nref.as_key(), high) != Ordering::Less =>
            {
                return self.reverse_iter(left, acc);
            }
            _ => (),
        }

        if !self.reverse_iter(right, acc) {
            return false;
        }

        acc.push(nref.key.clone());
        if acc.len() >= self.limit {
            return false;
        }

        self.reverse_iter(left, acc)
    }
}

impl<'a, K, C> Iterator for Reverse<'a, K, C>
where
    K: Clone,
    C: Comparator<K>,
{
    type Item = K;

    fn next(&mut self) -> Option<K> {
        if self.fin {
            return None;
        }

        let mut item = self.node_iter.next();
        if item.is_none() {
            let mut acc: Vec<K> = Vec::with_capacity(self.limit);
            self.reverse_iter(self.set.root.as_deref(), &mut acc);
            item = if acc.is_empty() {
                None
            } else {
                self.high = Bound::Excluded(acc.last().unwrap().clone());
                self.node_iter = acc.into_iter();
                self.node_iter.next()
            };
        }

        // handle lower limit
        let key = match item {
            Some(key) => key,
            None => {
                self.fin = true;
                return None;
            }
        };
        match &self.low {
            Bound::Unbounded => Some(key),
            Bound::Included(lw) if self.set.cmp.compare(&key, lw) != Ordering::Less => {
                Some(key)
            }
            Bound::Excluded(lw)
                if self.set.cmp.compare(&key, lw) == Ordering::Greater =>
            {
                Some(key)
            }
            _ => {
                self.fin = true;
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "index_test.rs"]
mod index_test;
