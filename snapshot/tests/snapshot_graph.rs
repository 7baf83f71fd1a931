//! End-to-end snapshots of small object graphs

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use object_snapshot::literal;
use object_snapshot::{
    AccessorError, AccessorOrigin, CannedRepresentations, Context, Described, Error, Expr,
    LiveObject, ObjectId, Primitive, RuntimeType, Statement, TargetType, TypeName, TypeRef, Value,
    make_snapshot_as_subclass,
};

#[derive(LiveObject)]
#[live_object(type_name = "com.example.model.Person")]
struct Person {
    #[accessor]
    name:   String,
    #[accessor]
    age:    i32,
    #[accessor(name = "getMother")]
    mother: RefCell<Option<Rc<Self>>>,
}

fn person(name: &str, age: i32, mother: Option<&Rc<Person>>) -> Rc<Person> {
    Rc::new(Person {
        name: name.to_string(),
        age,
        mother: RefCell::new(mother.cloned()),
    })
}

#[derive(LiveObject)]
#[live_object(type_name = "com.example.model.PersonCollection", interface)]
struct PersonCollection {
    #[accessor]
    persons: Vec<Rc<Person>>,
}

#[derive(LiveObject)]
#[live_object(type_name = "com.example.model.Pet")]
struct Pet {
    #[accessor]
    name: String,
}

#[derive(LiveObject)]
#[live_object(type_name = "com.example.model.Owner")]
struct Owner {
    #[accessor]
    pet: Rc<Pet>,
}

/// Hand-written live object that counts accessor invocations
struct Probe {
    id:    i64,
    calls: Cell<usize>,
    fail:  bool,
}

impl Probe {
    fn new(id: i64) -> Rc<Self> {
        Rc::new(Self {
            id,
            calls: Cell::new(0),
            fail: false,
        })
    }

    fn failing(id: i64) -> Rc<Self> {
        Rc::new(Self {
            id,
            calls: Cell::new(0),
            fail: true,
        })
    }
}

impl LiveObject for Probe {
    fn runtime_type(&self) -> RuntimeType { RuntimeType::new("com.example.model.Probe") }

    fn invoke(&self, accessor: &str) -> Result<Value, AccessorError> {
        self.calls.set(self.calls.get() + 1);
        match accessor {
            "getId" if self.fail => Err(AccessorError::failed(accessor, "probe is broken")),
            "getId" => Ok(Value::Long(self.id)),
            other => Err(AccessorError::UnknownAccessor {
                type_name: Self::type_name(),
                accessor:  other.to_string(),
            }),
        }
    }
}

impl Described for Probe {
    fn type_name() -> TypeName { TypeName::new("com.example.model.Probe") }

    fn describe_type() -> TargetType {
        TargetType::class("com.example.model.Probe").accessor("getId", Primitive::Long)
    }
}

#[derive(LiveObject)]
#[live_object(type_name = "com.example.model.Pair")]
struct Pair {
    #[accessor]
    first:  Rc<Probe>,
    #[accessor]
    second: Rc<Probe>,
}

#[derive(LiveObject)]
#[live_object(type_name = "com.example.model.Holder")]
struct Holder {
    #[accessor]
    probe: Rc<Probe>,
}

#[derive(LiveObject)]
#[live_object(type_name = "com.example.model.Shelf")]
struct Shelf {
    #[accessor]
    first:  Rc<Holder>,
    #[accessor]
    second: Rc<Holder>,
    #[accessor]
    probes: Vec<Rc<Probe>>,
}

#[derive(LiveObject)]
#[live_object(type_name = "com.example.model.TreeNode")]
struct TreeNode {
    #[accessor]
    label: String,
    #[accessor]
    kids:  RefCell<Vec<Rc<Self>>>,
}

fn tree_node(label: &str) -> Rc<TreeNode> {
    Rc::new(TreeNode {
        label: label.to_string(),
        kids:  RefCell::new(Vec::new()),
    })
}

#[derive(LiveObject)]
#[live_object(
    type_name = "com.example.model.Dog",
    implements("com.example.model.Animal", "com.example.model.Named")
)]
struct Dog {
    #[accessor]
    name: String,
}

#[derive(LiveObject)]
#[live_object(type_name = "com.example.model.Kennel")]
struct Kennel {
    #[accessor(returns = "com.example.model.Animal")]
    resident: Rc<Dog>,
}

fn animal_type() -> TargetType {
    TargetType::interface("com.example.model.Animal").accessor("getName", TypeRef::string())
}

fn snapshot_person(object: &Rc<Person>, canned: Option<&CannedRepresentations>) -> String {
    make_snapshot_as_subclass(
        &Value::object(object),
        &Person::describe_type(),
        canned,
        &[Person::describe_type()],
    )
    .unwrap()
    .generate(&Context::create())
    .unwrap()
}

#[test]
fn nested_recursion_type_is_expanded_inline() {
    let mom = person("mom", 30, None);
    let kid = person("kid", 5, Some(&mom));

    let expected = "new com.example.model.Person() {\n  \
                    public int getAge() {\n    \
                    return 5;\n  \
                    }\n  \
                    public com.example.model.Person getMother() {\n    \
                    return new com.example.model.Person() {\n      \
                    public int getAge() {\n        \
                    return 30;\n      \
                    }\n      \
                    public com.example.model.Person getMother() {\n        \
                    return null;\n      \
                    }\n      \
                    public String getName() {\n        \
                    return \"mom\";\n      \
                    }\n    \
                    };\n  \
                    }\n  \
                    public String getName() {\n    \
                    return \"kid\";\n  \
                    }\n\
                    }";

    assert_eq!(snapshot_person(&kid, None), expected);
}

#[test]
fn object_cycle_is_reported_with_every_member() {
    let first = person("cycle1", 30, None);
    let second = person("cycle2", 5, Some(&first));
    *first.mother.borrow_mut() = Some(Rc::clone(&second));

    let snapshot = make_snapshot_as_subclass(
        &Value::object(&second),
        &Person::describe_type(),
        None,
        &[Person::describe_type()],
    )
    .unwrap();
    let report = snapshot.generate(&Context::create()).unwrap_err();

    let members = report
        .current_context()
        .cycle_members()
        .expect("expected CycleDetected");
    assert!(members.contains(&ObjectId::of(&first)));
    assert!(members.contains(&ObjectId::of(&second)));

    *first.mother.borrow_mut() = None;
}

#[test]
fn canned_representation_replaces_shared_mother() {
    let mom = person("mom", 30, None);
    let canned = CannedRepresentations::new().with(&mom, Expr::return_variable("mom"));

    for (name, age) in [("Kid 1", 3), ("Kid 2", 4), ("Kid 3", 5)] {
        let kid = person(name, age, Some(&mom));
        let generated = snapshot_person(&kid, Some(&canned));
        assert_eq!(
            generated,
            format!(
                "new com.example.model.Person() {{\n  public int getAge() {{\n    return {age};\n  }}\n  public com.example.model.Person getMother() {{\n    return mom;\n  }}\n  public String getName() {{\n    return \"{name}\";\n  }}\n}}"
            )
        );
    }

    let mom_snapshot = snapshot_person(&mom, Some(&canned));
    assert!(mom_snapshot.contains("return null;"));
}

/// One `add(..)` line of a person list, as indented inside `getPersons()`
fn person_element(name: &str, age: i32, parent: &str) -> String {
    format!(
        "        add(new com.example.model.Person() {{\n          \
         public int getAge() {{\n            \
         return {age};\n          \
         }}\n          \
         public com.example.model.Person getMother() {{\n            \
         return new com.example.model.Person() {{\n              \
         public int getAge() {{\n                \
         return 50;\n              \
         }}\n              \
         public com.example.model.Person getMother() {{\n                \
         return null;\n              \
         }}\n              \
         public String getName() {{\n                \
         return \"{parent}\";\n              \
         }}\n            \
         }};\n          \
         }}\n          \
         public String getName() {{\n            \
         return \"{name}\";\n          \
         }}\n        \
         }});\n"
    )
}

#[test]
fn collections_of_literalizable_objects_are_snapshotted() {
    let people = [
        ("Ada L.", 20, "Ada's Parent"),
        ("Grace H.", 20, "Grace's Parent"),
        ("Alan T.", 0, "Alan's Parent"),
    ];
    let persons = people
        .iter()
        .map(|(name, age, parent)| person(name, *age, Some(&person(parent, 50, None))))
        .collect();
    let collection = Rc::new(PersonCollection { persons });

    let ctx = Context::create()
        .with_literalizable([PersonCollection::describe_type(), Person::describe_type()]);
    let generated = literal::load(&Value::object(&collection), &ctx).unwrap();

    let elements: String = people
        .iter()
        .map(|(name, age, parent)| person_element(name, *age, parent))
        .collect();
    let expected = format!(
        "new com.example.model.PersonCollection() {{\n  \
         public java.util.List getPersons() {{\n    \
         return new java.util.ArrayList() {{\n      \
         {{\n\
         {elements}      \
         }}\n    \
         }};\n  \
         }}\n\
         }}"
    );

    assert_eq!(generated, expected);
}

#[test]
fn cycle_through_a_list_is_reported_with_every_member() {
    let first = tree_node("A");
    let second = tree_node("B");
    first.kids.borrow_mut().push(Rc::clone(&second));
    second.kids.borrow_mut().push(Rc::clone(&first));

    let snapshot = make_snapshot_as_subclass(
        &Value::object(&first),
        &TreeNode::describe_type(),
        None,
        &[TreeNode::describe_type()],
    )
    .unwrap();
    let report = snapshot.render(&Context::create()).unwrap_err();

    let members = report
        .current_context()
        .cycle_members()
        .expect("expected CycleDetected");
    assert_eq!(members, vec![ObjectId::of(&first), ObjectId::of(&second)]);

    first.kids.borrow_mut().clear();
}

#[test]
fn shared_reference_is_generated_once() {
    let probe = Probe::new(7);
    let pair = Rc::new(Pair {
        first:  Rc::clone(&probe),
        second: Rc::clone(&probe),
    });

    let snapshot = make_snapshot_as_subclass(
        &Value::object(&pair),
        &Pair::describe_type(),
        None,
        &[Probe::describe_type()],
    )
    .unwrap();
    let generated = snapshot.generate(&Context::create()).unwrap();

    assert_eq!(probe.calls.get(), 1);
    assert_eq!(generated.matches("return 7L;").count(), 2);
}

#[test]
fn object_shared_by_sibling_objects_is_generated_once() {
    let probe = Probe::new(7);
    let holder = || {
        Rc::new(Holder {
            probe: Rc::clone(&probe),
        })
    };
    let shelf = Rc::new(Shelf {
        first:  holder(),
        second: holder(),
        probes: vec![Rc::clone(&probe), Rc::clone(&probe)],
    });

    let generated = make_snapshot_as_subclass(
        &Value::object(&shelf),
        &Shelf::describe_type(),
        None,
        &[Holder::describe_type(), Probe::describe_type()],
    )
    .unwrap()
    .render(&Context::create())
    .unwrap();

    assert_eq!(probe.calls.get(), 1);
    assert_eq!(generated.matches("return 7L;").count(), 4);
    assert_eq!(generated.matches("new com.example.model.Holder()").count(), 2);
}

#[test]
fn not_literalizable_value_names_its_accessor() {
    let owner = Rc::new(Owner {
        pet: Rc::new(Pet {
            name: "rex".to_string(),
        }),
    });

    let snapshot =
        make_snapshot_as_subclass(&Value::object(&owner), &Owner::describe_type(), None, &[])
            .unwrap();
    let report = snapshot.generate(&Context::create()).unwrap_err();

    assert!(report.current_context().is_not_literalizable());
    let origin = report
        .downcast_ref::<AccessorOrigin>()
        .expect("missing accessor origin");
    assert_eq!(origin.accessor, "getPet");
    assert_eq!(origin.declaring_type.as_str(), "com.example.model.Owner");
    assert_eq!(origin.return_type, TypeRef::named("com.example.model.Pet"));

    let rendered = format!("{report:?}");
    assert!(rendered.contains("In attempt to snapshot return value of com.example.model.Owner.getPet()"));
    assert!(rendered.contains("While generating a snapshot of"));
}

#[test]
fn parameterised_method_is_rejected_before_any_accessor_call() {
    let probe = Probe::new(1);
    let target = TargetType::class("com.example.model.Probe")
        .extends(&Probe::describe_type())
        .method("doThing", vec![TypeRef::string()], TypeRef::Void)
        .method("equals", vec![TypeRef::named("java.lang.Object")], Primitive::Boolean);

    let report = make_snapshot_as_subclass(&Value::object(&probe), &target, None, &[]).unwrap_err();

    assert!(matches!(report.current_context(), Error::InvalidArgument(message) if message.contains("doThing(java.lang.String)")));
    assert_eq!(probe.calls.get(), 0);
}

#[test]
fn render_is_cached_and_idempotent() {
    let probe = Probe::new(2);
    let snapshot =
        make_snapshot_as_subclass(&Value::object(&probe), &Probe::describe_type(), None, &[])
            .unwrap();
    let ctx = Context::create();

    let first = snapshot.render(&ctx).unwrap();
    let second = snapshot.render(&ctx).unwrap();

    assert_eq!(first, second);
    assert_eq!(probe.calls.get(), 1);
    assert_eq!(
        snapshot.described_type(),
        TypeRef::named("com.example.model.Probe")
    );
}

#[test]
fn void_accessors_get_empty_bodies() {
    let probe = Probe::new(3);
    let target = Probe::describe_type().accessor("reset", TypeRef::Void);

    let generated = make_snapshot_as_subclass(&Value::object(&probe), &target, None, &[])
        .unwrap()
        .render(&Context::create())
        .unwrap();

    assert_eq!(
        generated,
        "new com.example.model.Probe() {\n  public long getId() {\n    return 3L;\n  }\n  public void reset() {\n  }\n}"
    );
    assert_eq!(probe.calls.get(), 1);
}

#[test]
fn failed_snapshot_is_not_retried() {
    let probe = Probe::failing(4);
    let snapshot =
        make_snapshot_as_subclass(&Value::object(&probe), &Probe::describe_type(), None, &[])
            .unwrap();
    let ctx = Context::create();

    let report = snapshot.render(&ctx).unwrap_err();
    assert!(matches!(report.current_context(), Error::GenerationFailure(_)));
    assert!(report.downcast_ref::<AccessorError>().is_some());

    assert!(snapshot.render(&ctx).is_err());
    assert_eq!(probe.calls.get(), 1);
}

#[test]
fn target_must_accept_the_runtime_type() {
    let pet = Rc::new(Pet {
        name: "rex".to_string(),
    });

    let report =
        make_snapshot_as_subclass(&Value::object(&pet), &Person::describe_type(), None, &[])
            .unwrap_err();
    assert!(matches!(report.current_context(), Error::InvalidArgument(_)));

    let final_pet = Pet::describe_type().final_class();
    let report =
        make_snapshot_as_subclass(&Value::object(&pet), &final_pet, None, &[]).unwrap_err();
    assert!(report.current_context().to_string().contains("final"));
}

#[test]
fn equality_methods_never_reach_the_output() {
    let probe = Probe::new(5);
    let target = Probe::describe_type()
        .method("equals", vec![TypeRef::named("java.lang.Object")], Primitive::Boolean)
        .method("hashCode", vec![], Primitive::Int);

    let generated = make_snapshot_as_subclass(&Value::object(&probe), &target, None, &[])
        .unwrap()
        .render(&Context::create())
        .unwrap();

    assert!(!generated.contains("equals"));
    assert!(!generated.contains("hashCode"));
    assert!(generated.contains("public long getId()"));
    assert_eq!(probe.calls.get(), 1);
}

#[test]
fn declared_supertypes_make_an_object_assignable_to_its_interfaces() {
    let kennel = Rc::new(Kennel {
        resident: Rc::new(Dog {
            name: "rex".to_string(),
        }),
    });

    let runtime = kennel.resident.runtime_type();
    assert_eq!(
        runtime.supertypes,
        vec![
            TypeName::new("com.example.model.Animal"),
            TypeName::new("com.example.model.Named"),
        ]
    );

    let generated = make_snapshot_as_subclass(
        &Value::object(&kennel),
        &Kennel::describe_type(),
        None,
        &[animal_type()],
    )
    .unwrap()
    .render(&Context::create())
    .unwrap();

    assert_eq!(
        generated,
        "new com.example.model.Kennel() {\n  \
         public com.example.model.Animal getResident() {\n    \
         return new com.example.model.Animal() {\n      \
         public String getName() {\n        \
         return \"rex\";\n      \
         }\n    \
         };\n  \
         }\n\
         }"
    );
}
