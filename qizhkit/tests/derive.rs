use qizhkit::{FieldPath, Lens, LensExt, LensIndexExt, Updatable};

#[derive(Clone, Debug, PartialEq, Updatable)]
struct Fields {
    a: i32,
    b: f32,
    c: String,
}

#[derive(Clone, Debug, PartialEq, Updatable)]
struct Tuple(i32, f32, String);

#[derive(Clone, Debug, PartialEq, Updatable)]
struct Wrapper<T: Clone> {
    value: T,
    history: Vec<T>,
}

#[derive(Clone, Debug, PartialEq, Updatable)]
struct Pair<A, B>(A, B)
where
    A: PartialEq;

#[derive(Clone, Debug, Default, PartialEq, Updatable)]
struct Attributes {
    #[updatable(skip)]
    cache: u64,
    #[updatable(rename = "len_lens")]
    len: usize,
    r#type: String,
}

impl Attributes {
    // would clash with the lens constant without `rename`
    fn len(&self) -> usize {
        self.len
    }
}

#[test]
fn struct_check() {
    let mut fields = Fields {
        a: 1,
        b: 2.0,
        c: "third".to_string(),
    };

    let mut tup = Tuple(4, 5.0, "sixth".to_string());

    assert_eq!(Fields::a.get(&fields), 1);
    assert_eq!(Fields::b.get(&fields), 2.0);
    assert_eq!(Fields::c.get(&fields), "third");

    assert_eq!(Tuple::elem_0.get(&tup), 4);
    assert_eq!(Tuple::elem_1.get(&tup), 5.0);
    assert_eq!(Tuple::elem_2.get(&tup), "sixth");

    Fields::c.set(&mut fields, "seventh".to_string());
    Tuple::elem_2.with_mut(&mut tup, |s| *s = "eighth".to_string());

    assert_eq!(Fields::c.get(&fields), "seventh");
    assert_eq!(Tuple::elem_2.get(&tup), "eighth");
}

#[test]
fn paths() {
    assert_eq!(Fields::a.path(), FieldPath::field("a"));
    assert_eq!(Tuple::elem_1.path().to_string(), "1");
    assert_eq!(Attributes::len_lens.path(), FieldPath::field("len"));
    assert_eq!(Attributes::r#type.path(), FieldPath::field("type"));
    assert_eq!(format!("{:?}", Fields::c), "Fields::c");
}

#[test]
fn tuple_updates() {
    let tup = Tuple(1, 1.5, "one".to_string());
    assert_eq!(tup.updating_field(Tuple::elem_0, 2), Tuple(2, 1.5, "one".to_string()));
    assert_eq!(
        tup.updater(Tuple::elem_2).push('!'),
        Tuple(1, 1.5, "one!".to_string())
    );
}

#[test]
fn generic_structs() {
    let wrapper = Wrapper {
        value: 1u8,
        history: vec![],
    };
    let updated = wrapper
        .updating_field(Wrapper::value, 2)
        .appending(Wrapper::history, 1);
    assert_eq!(
        updated,
        Wrapper {
            value: 2,
            history: vec![1]
        }
    );
    assert_eq!(Wrapper::<u8>::history.index(0).get(&updated), 1);

    let pair = Pair("left", 0.5);
    assert_eq!(pair.updating_field(Pair::elem_1, 1.0), Pair("left", 1.0));
    assert_eq!(pair.updater(Pair::elem_0).with("right"), Pair("right", 0.5));
}

#[test]
fn skip_and_rename() {
    let attrs = Attributes {
        cache: 42,
        len: 3,
        r#type: "kind".to_string(),
    };
    let updated = attrs
        .updating_field(Attributes::len_lens, 4)
        .updating_field(Attributes::r#type, "other".to_string());
    assert_eq!(updated.len(), 4);
    assert_eq!(updated.cache, 42);
    assert_eq!(updated.r#type, "other");
}
