//! Module handling the resources used by the editor.

mod filesystem;
mod fonts;


pub use self::filesystem::{BytesLoader, FileLoader, PathLoader};
pub use self::fonts::{Font, FontLoader, FILE_EXTENSION as FONT_FILE_EXTENSION};


use std::fmt;
use std::sync::Arc;

use util::cache::ThreadSafeCache;


/// Loader of resources from some external source.
pub trait Loader {
    /// Type of resources that this loader can load.
    type Item;
    /// Error that may occur while loading the resource.
    type Err;

    /// Load a resource of given name.
    fn load<'n>(&self, name: &'n str) -> Result<Self::Item, Self::Err>;
}


/// A loader that keeps an LRU cache of resources previously loaded.
pub struct CachingLoader<L: Loader> {
    inner: L,
    cache: ThreadSafeCache<String, L::Item>,
}

impl<L: Loader> CachingLoader<L> {
    #[inline]
    pub fn new(inner: L, capacity: usize) -> Self {
        CachingLoader{
            inner: inner,
            cache: ThreadSafeCache::new(capacity),
        }
    }

    #[inline]
    pub fn cache(&self) -> &ThreadSafeCache<String, L::Item> {
        &self.cache
    }
}

impl<L: Loader> Loader for CachingLoader<L> {
    type Item = Arc<L::Item>;
    type Err = L::Err;

    /// Load the object from cache or fall back on the original Loader.
    /// Cache the objects loaded this way.
    fn load<'n>(&self, name: &'n str) -> Result<Self::Item, Self::Err> {
        if let Some(obj) = self.cache.get(name) {
            return Ok(obj);
        }
        let obj = self.inner.load(name)?;
        let cached_obj = self.cache.put(name.to_owned(), obj);
        Ok(cached_obj)
    }
}

impl<L: Loader> fmt::Debug for CachingLoader<L> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct("CachingLoader")
            .field("inner", &"...")
            .field("cache", &self.cache)
            .finish()
    }
}


#[cfg(test)]
mod tests {
    use super::{CachingLoader, Loader};

    /// Loader that "loads" the uppercased resource name.
    struct Upcase;
    impl Loader for Upcase {
        type Item = String;
        type Err = ();
        fn load<'n>(&self, name: &'n str) -> Result<String, ()> {
            Ok(name.to_uppercase())
        }
    }

    #[test]
    fn second_load_is_a_cache_hit() {
        let loader = CachingLoader::new(Upcase, 4);
        assert_eq!("FOO", *loader.load("foo").unwrap());
        assert_eq!("FOO", *loader.load("foo").unwrap());
        assert_eq!(1, loader.cache().hits());
        assert_eq!(1, loader.cache().misses());
        assert_eq!(1, loader.cache().len());
    }
}
