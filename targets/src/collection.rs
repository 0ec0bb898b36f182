use crate::error::Result;
use std::net::SocketAddr;
use std::ops::Index;
use std::slice;

/// Ordered, append-only list of resolved destination addresses.
///
/// Insertion order is kept because consumers pick targets round-robin.
/// `append` may move the backing storage, so references obtained from
/// `get`, `iter` or `as_slice` cannot be held across it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressCollection {
    addrs: Vec<SocketAddr>,
}

impl AddressCollection {
    pub fn new() -> Self {
        Self { addrs: Vec::new() }
    }

    /// Grows the collection by one slot and stores `addr` in it.
    ///
    /// Allocation failure is reported instead of aborting; the collection is
    /// left untouched in that case.
    pub fn append(&mut self, addr: SocketAddr) -> Result<()> {
        self.addrs.try_reserve(1)?;
        self.addrs.push(addr);
        Ok(())
    }

    pub fn extend_from<I>(&mut self, addrs: I) -> Result<()>
    where
        I: IntoIterator<Item = SocketAddr>,
    {
        for addr in addrs {
            self.append(addr)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.addrs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addrs.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&SocketAddr> {
        self.addrs.get(index)
    }

    pub fn iter(&self) -> slice::Iter<'_, SocketAddr> {
        self.addrs.iter()
    }

    pub fn as_slice(&self) -> &[SocketAddr] {
        &self.addrs
    }
}

impl Index<usize> for AddressCollection {
    type Output = SocketAddr;

    fn index(&self, index: usize) -> &SocketAddr {
        &self.addrs[index]
    }
}

impl<'a> IntoIterator for &'a AddressCollection {
    type Item = &'a SocketAddr;
    type IntoIter = slice::Iter<'a, SocketAddr>;

    fn into_iter(self) -> Self::IntoIter {
        self.addrs.iter()
    }
}
