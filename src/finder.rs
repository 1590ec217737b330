use std::path::PathBuf;
use std::sync::Arc;

use filters::debug_filter::trace_predicate_added;
use filters::{
    DateSpec, EntryKind, FilterGroup, GroupSet, MaskPattern, Predicate, SizeSpec, compile_masks,
    date_predicate, exclude_predicate, select_predicate, size_predicate,
};
use walk::{MaxDepth, Order, TraversalPlan, WalkChain, WalkEntry};

use crate::{ExtensionRegistry, FinderError};

/// Predicate list that restriction calls currently append to.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Cursor {
    /// The selection group at this index.
    Group(usize),
    /// The exclusion group that decides pruning.
    Exclusion,
}

/// Fluent file search query.
///
/// A query starts from [`find`](Self::find), [`find_files`](Self::find_files)
/// or [`find_directories`](Self::find_directories), receives its roots from
/// [`from`](Self::from) or [`within`](Self::within), and is narrowed by
/// restriction calls. Restrictions apply to the list the [`Cursor`] points
/// at: the latest selection group until roots are set, the exclusion group
/// afterwards.
///
/// # Examples
///
/// ```
/// use finder::Finder;
/// # fn demo() -> Result<(), Box<dyn std::error::Error>> {
/// let temp = tempfile::tempdir()?;
/// std::fs::create_dir(temp.path().join("temp"))?;
/// std::fs::write(temp.path().join("temp/scratch.txt"), b"x")?;
/// std::fs::write(temp.path().join("notes.txt"), b"x")?;
///
/// let finder = Finder::find_files(["*.txt"])?
///     .from([temp.path()])?
///     .exclude(["temp"])?;
///
/// let names: Vec<String> = finder
///     .iter()?
///     .map(|entry| entry.map(|entry| entry.subpath().to_owned()))
///     .collect::<Result<_, _>>()?;
/// assert_eq!(names, ["notes.txt"]);
/// # Ok(())
/// # }
/// # demo().unwrap();
/// ```
#[derive(Clone, Debug)]
pub struct Finder {
    paths: Vec<PathBuf>,
    groups: GroupSet<WalkEntry>,
    exclusion: FilterGroup<WalkEntry>,
    order: Order,
    max_depth: MaxDepth,
    cursor: Cursor,
    extensions: ExtensionRegistry,
}

impl Finder {
    fn empty() -> Self {
        Self {
            paths: Vec::new(),
            groups: GroupSet::new(),
            exclusion: FilterGroup::new(),
            order: Order::ParentFirst,
            max_depth: MaxDepth::Unlimited,
            cursor: Cursor::Exclusion,
            extensions: ExtensionRegistry::new(),
        }
    }

    /// Begins a search for files and directories matching `masks`.
    ///
    /// Creates a directory group followed by a file group; the cursor points
    /// at the file group.
    pub fn find<I, S>(masks: I) -> Result<Self, FinderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let pattern = compile_masks(masks)?;
        Ok(Self::empty()
            .select(Some(EntryKind::Directory), pattern.clone())
            .select(Some(EntryKind::File), pattern))
    }

    /// Begins a search for files matching `masks`.
    pub fn find_files<I, S>(masks: I) -> Result<Self, FinderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::empty().select(Some(EntryKind::File), compile_masks(masks)?))
    }

    /// Begins a search for directories matching `masks`.
    pub fn find_directories<I, S>(masks: I) -> Result<Self, FinderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::empty().select(Some(EntryKind::Directory), compile_masks(masks)?))
    }

    fn select(mut self, kind: Option<EntryKind>, pattern: MaskPattern) -> Self {
        let index = self.groups.push(FilterGroup::new());
        self.cursor = Cursor::Group(index);
        self.append("select", select_predicate(kind, pattern));
        self
    }

    fn append(&mut self, kind: &str, predicate: Predicate<WalkEntry>) {
        match self.cursor {
            Cursor::Group(index) => {
                if let Some(group) = self.groups.get_mut(index) {
                    group.push(predicate);
                }
                trace_predicate_added(kind, Some(index));
            }
            Cursor::Exclusion => {
                self.exclusion.push(predicate);
                trace_predicate_added(kind, None);
            }
        }
    }

    /// Searches only the immediate contents of `paths`.
    ///
    /// Equivalent to [`from`](Self::from) with a depth limit of `0`; a later
    /// [`limit_depth`](Self::limit_depth) overrides the limit.
    pub fn within<I, P>(mut self, paths: I) -> Result<Self, FinderError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.max_depth = MaxDepth::Levels(0);
        self.from(paths)
    }

    /// Searches `paths` recursively and moves the cursor to the exclusion
    /// group.
    ///
    /// Fails with [`FinderError::PathsAlreadySet`] when roots were already
    /// configured.
    pub fn from<I, P>(mut self, paths: I) -> Result<Self, FinderError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        if !self.paths.is_empty() {
            return Err(FinderError::PathsAlreadySet);
        }
        self.paths = paths.into_iter().map(Into::into).collect();
        self.cursor = Cursor::Exclusion;
        Ok(self)
    }

    /// Rejects entries whose subpath matches any of `masks`.
    ///
    /// After [`from`](Self::from) this prunes matching directories from the
    /// walk. A set containing `*` or no usable mask adds nothing.
    pub fn exclude<I, S>(mut self, masks: I) -> Result<Self, FinderError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Some(predicate) = exclude_predicate(compile_masks(masks)?) {
            self.append("exclude", predicate);
        }
        Ok(self)
    }

    /// Appends a caller-supplied predicate at the cursor.
    #[must_use]
    pub fn filter<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&WalkEntry) -> bool + Send + Sync + 'static,
    {
        self.append("filter", Arc::new(predicate));
        self
    }

    /// Limits recursion to `depth` levels below the roots' children.
    ///
    /// `0` lists only the roots' contents and `-1` removes the limit. Values
    /// below `-1` fail with [`FinderError::InvalidDepth`].
    pub fn limit_depth(mut self, depth: i32) -> Result<Self, FinderError> {
        self.max_depth = MaxDepth::from_signed(depth).ok_or(FinderError::InvalidDepth(depth))?;
        Ok(self)
    }

    /// Restricts size with a predicate string such as `>=10K` or `< 1.5M`.
    pub fn size(mut self, predicate: &str) -> Result<Self, FinderError> {
        self.append("size", size_predicate(SizeSpec::parse(predicate)?));
        Ok(self)
    }

    /// Restricts size with an explicit operator and byte count.
    pub fn size_with(mut self, operator: &str, bytes: u64) -> Result<Self, FinderError> {
        self.append("size", size_predicate(SizeSpec::new(operator, bytes)?));
        Ok(self)
    }

    /// Restricts modification time with a predicate string such as
    /// `> 2024-01-01` or `<= 2 weeks ago`.
    pub fn date(mut self, predicate: &str) -> Result<Self, FinderError> {
        self.append("date", date_predicate(DateSpec::parse(predicate)?));
        Ok(self)
    }

    /// Restricts modification time with an explicit operator and date.
    pub fn date_with(mut self, operator: &str, date: &str) -> Result<Self, FinderError> {
        self.append("date", date_predicate(DateSpec::new(operator, date)?));
        Ok(self)
    }

    /// Yields directory contents before the directory itself.
    #[must_use]
    pub const fn child_first(mut self) -> Self {
        self.order = Order::ChildFirst;
        self
    }

    /// Attaches a shared extension registry.
    #[must_use]
    pub fn with_extensions(mut self, extensions: ExtensionRegistry) -> Self {
        self.extensions = extensions;
        self
    }

    /// Returns the attached extension registry.
    #[must_use]
    pub const fn extensions(&self) -> &ExtensionRegistry {
        &self.extensions
    }

    /// Invokes the extension method registered under `name`.
    ///
    /// # Examples
    ///
    /// ```
    /// use finder::{ExtensionRegistry, Finder};
    ///
    /// let registry = ExtensionRegistry::new();
    /// registry.register("larger_than", |finder, args| {
    ///     finder.size(&format!(">{}", args.first().copied().unwrap_or("0")))
    /// });
    ///
    /// let finder = Finder::find_files(["*"])
    ///     .unwrap()
    ///     .with_extensions(registry)
    ///     .call("larger_than", &["1K"])
    ///     .unwrap();
    /// assert!(finder.call("missing", &[]).is_err());
    /// ```
    pub fn call(self, name: &str, args: &[&str]) -> Result<Self, FinderError> {
        let method = self
            .extensions
            .get(name)
            .ok_or_else(|| FinderError::UnknownExtension(name.to_owned()))?;
        method(self, args)
    }

    /// Roots configured by [`from`](Self::from) or [`within`](Self::within).
    #[must_use]
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Current position of the cursor.
    #[must_use]
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Current depth limit.
    #[must_use]
    pub const fn max_depth(&self) -> MaxDepth {
        self.max_depth
    }

    /// Current yield order.
    #[must_use]
    pub const fn order(&self) -> Order {
        self.order
    }

    /// Starts a fresh walk of the live filesystem.
    ///
    /// The configuration is snapshotted, so the query may be iterated again
    /// or modified afterwards without affecting walks already started.
    #[allow(clippy::iter_not_returning_iterator)]
    pub fn iter(&self) -> Result<WalkChain, FinderError> {
        if self.paths.is_empty() {
            return Err(FinderError::NoPaths);
        }
        let plan = TraversalPlan::new(
            self.exclusion.clone(),
            self.groups.clone(),
            self.max_depth,
            self.order,
        );
        Ok(WalkChain::new(self.paths.clone(), Arc::new(plan)))
    }

    /// Walks the filesystem and counts the matching entries.
    pub fn count(&self) -> Result<usize, FinderError> {
        let mut total = 0;
        for entry in self.iter()? {
            entry?;
            total += 1;
        }
        Ok(total)
    }
}
