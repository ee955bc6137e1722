mod descriptor;

use std::{collections::VecDeque, rc::Rc, sync::Arc};

pub use descriptor::*;

use crate::value::Slot;

/// A flat struct that result rows are scanned into.
///
/// Usually derived with [`macro@crate::Record`]. Hand-written implementations must keep
/// [`Record::slots`] in the same order as the fields of [`Record::descriptor`].
///
/// The derive also implements [`Element`] for the record itself, which is what lets a
/// `Vec<T>` hold records by value. A hand-written record has to provide that impl as well,
/// otherwise only `Box<T>`, `Rc<T>` and `Arc<T>` collections accept it.
///
/// ```
/// use rowscan::{
///     once_cell::sync::Lazy, scan_rows, Element, FieldDescriptor, Record, RecordBatchRows,
///     RecordDescriptor, Slot,
/// };
///
/// #[derive(Debug, Default)]
/// struct Tag {
///     id: i64,
///     label: String,
/// }
///
/// impl Record for Tag {
///     fn descriptor() -> &'static RecordDescriptor {
///         static DESCRIPTOR: Lazy<RecordDescriptor> = Lazy::new(|| {
///             RecordDescriptor::new(
///                 "Tag",
///                 vec![
///                     FieldDescriptor::new("id"),
///                     FieldDescriptor::with_column("label", "tag_name"),
///                 ],
///             )
///         });
///
///         &DESCRIPTOR
///     }
///
///     fn slots(&mut self) -> Vec<&mut dyn Slot> {
///         vec![&mut self.id as &mut dyn Slot, &mut self.label as &mut dyn Slot]
///     }
/// }
///
/// impl Element for Tag {
///     type Record = Self;
///
///     fn from_record(record: Self) -> Self {
///         record
///     }
/// }
///
/// let mut tags: Vec<Tag> = Vec::new();
/// scan_rows(&mut RecordBatchRows::new(Vec::new()), &mut tags).unwrap();
/// assert!(tags.is_empty());
/// ```
pub trait Record: Default + 'static {
    /// Field layout of the record, built once per type.
    fn descriptor() -> &'static RecordDescriptor;

    /// Mutable accessors for every mapped field, in descriptor order.
    fn slots(&mut self) -> Vec<&mut dyn Slot>;
}

/// How a scanned record is stored in a collection: by value or behind one pointer.
pub trait Element: Sized {
    type Record: Record;

    fn from_record(record: Self::Record) -> Self;
}

impl<R> Element for Box<R>
where
    R: Record,
{
    type Record = R;

    fn from_record(record: R) -> Self {
        Box::new(record)
    }
}

impl<R> Element for Rc<R>
where
    R: Record,
{
    type Record = R;

    fn from_record(record: R) -> Self {
        Rc::new(record)
    }
}

impl<R> Element for Arc<R>
where
    R: Record,
{
    type Record = R;

    fn from_record(record: R) -> Self {
        Arc::new(record)
    }
}

/// A growable, ordered collection that scanned records are appended to.
pub trait RecordCollection<E> {
    fn push_record(&mut self, element: E);

    /// Hint that `additional` more elements are about to be pushed.
    fn reserve_records(&mut self, _additional: usize) {}
}

impl<E> RecordCollection<E> for Vec<E> {
    fn push_record(&mut self, element: E) {
        self.push(element);
    }

    fn reserve_records(&mut self, additional: usize) {
        self.reserve(additional);
    }
}

impl<E> RecordCollection<E> for VecDeque<E> {
    fn push_record(&mut self, element: E) {
        self.push_back(element);
    }

    fn reserve_records(&mut self, additional: usize) {
        self.reserve(additional);
    }
}

#[cfg(test)]
pub(crate) mod test {
    use std::{collections::VecDeque, rc::Rc, sync::Arc};

    use once_cell::sync::Lazy;

    use super::{Element, FieldDescriptor, Record, RecordCollection, RecordDescriptor};
    use crate::value::Slot;

    /// Hand-registered record mirroring what the derive emits.
    #[allow(non_snake_case)]
    #[derive(Debug, Default, Clone, PartialEq)]
    pub(crate) struct Post {
        pub(crate) ID: i64,
        pub(crate) Title: String,
        pub(crate) ForeignID: i64,
        pub(crate) AuthorID: i64,
    }

    impl Record for Post {
        fn descriptor() -> &'static RecordDescriptor {
            static DESCRIPTOR: Lazy<RecordDescriptor> = Lazy::new(|| {
                RecordDescriptor::new(
                    "Post",
                    vec![
                        FieldDescriptor::new("ID"),
                        FieldDescriptor::new("Title"),
                        FieldDescriptor::new("ForeignID"),
                        FieldDescriptor::with_column("AuthorID", "user_id"),
                    ],
                )
            });

            &DESCRIPTOR
        }

        fn slots(&mut self) -> Vec<&mut dyn Slot> {
            vec![
                &mut self.ID as &mut dyn Slot,
                &mut self.Title as &mut dyn Slot,
                &mut self.ForeignID as &mut dyn Slot,
                &mut self.AuthorID as &mut dyn Slot,
            ]
        }
    }

    impl Element for Post {
        type Record = Self;

        fn from_record(record: Self) -> Self {
            record
        }
    }

    #[test]
    fn test_descriptor_is_cached() {
        assert!(std::ptr::eq(Post::descriptor(), Post::descriptor()));
        assert_eq!(Post::descriptor().type_name(), "Post");
        assert_eq!(Post::descriptor().len(), 4);
    }

    #[test]
    fn test_slots_follow_descriptor_order() {
        let mut post = Post::default();
        let names = Post::descriptor()
            .fields()
            .iter()
            .map(FieldDescriptor::name)
            .collect::<Vec<_>>();
        assert_eq!(names, ["ID", "Title", "ForeignID", "AuthorID"]);
        assert_eq!(post.slots().len(), names.len());
    }

    #[test]
    fn test_element_storage() {
        let post = Post {
            ID: 1,
            ..Default::default()
        };
        assert_eq!(Post::from_record(post.clone()), post);
        assert_eq!(*Box::<Post>::from_record(post.clone()), post);
        assert_eq!(*Rc::<Post>::from_record(post.clone()), post);
        assert_eq!(*Arc::<Post>::from_record(post.clone()), post);
    }

    #[test]
    fn test_collections_keep_order() {
        let mut posts: Vec<Post> = Vec::new();
        posts.reserve_records(2);
        posts.push_record(Post {
            ID: 1,
            ..Default::default()
        });
        posts.push_record(Post {
            ID: 2,
            ..Default::default()
        });
        assert_eq!(posts.iter().map(|p| p.ID).collect::<Vec<_>>(), [1, 2]);

        let mut queue: VecDeque<Box<Post>> = VecDeque::new();
        queue.push_record(Box::new(Post::default()));
        queue.push_record(Box::new(Post {
            ID: 3,
            ..Default::default()
        }));
        assert_eq!(queue.back().map(|p| p.ID), Some(3));
    }
}
