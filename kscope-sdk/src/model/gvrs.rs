use std::cmp::Ordering;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::model::gvr::Gvr;
use crate::sortorder;

/// An ordered collection of gvrs, sortable by group in natural order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gvrs(Vec<Gvr>);

impl Gvrs {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, gvr: Gvr) {
        self.0.push(gvr);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn swap(&mut self, i: usize, j: usize) {
        self.0.swap(i, j);
    }

    /// Returns true if the group at `i` sorts before the group at `j`.
    pub fn less(&self, i: usize, j: usize) -> bool {
        sortorder::natural_less(self.0[i].to_g(), self.0[j].to_g())
    }

    /// Stable sort by group. Entries sharing a group keep their order.
    pub fn sort(&mut self) {
        self.0.sort_by(compare_groups);
    }

    pub fn into_inner(self) -> Vec<Gvr> {
        self.0
    }
}

fn compare_groups(a: &Gvr, b: &Gvr) -> Ordering {
    sortorder::natural_cmp(a.to_g(), b.to_g())
}

impl Deref for Gvrs {
    type Target = [Gvr];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<Gvr>> for Gvrs {
    fn from(gvrs: Vec<Gvr>) -> Self {
        Self(gvrs)
    }
}

impl FromIterator<Gvr> for Gvrs {
    fn from_iter<I: IntoIterator<Item = Gvr>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Gvrs {
    type Item = Gvr;
    type IntoIter = std::vec::IntoIter<Gvr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Gvrs {
    type Item = &'a Gvr;
    type IntoIter = std::slice::Iter<'a, Gvr>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
