//! Prints snapshots of a small family graph
//!
//! Set `OBJECT_SNAPSHOT_LOG=debug` to watch the engine walk the graph.

use std::cell::RefCell;
use std::rc::Rc;

use object_snapshot::{
    CannedRepresentations, Context, Described, Expr, FormatOptions, LiveObject, Result,
    TracingLevel, Value, make_snapshot_as_subclass,
};
use tracing::{error, info};

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

impl Person {
    fn new(name: &str, age: i32, mother: Option<Rc<Self>>) -> Rc<Self> {
        Rc::new(Self {
            name: name.to_string(),
            age,
            mother: RefCell::new(mother),
        })
    }
}

fn run() -> Result<()> {
    let options = match std::env::args().nth(1) {
        Some(json) => FormatOptions::from_json(&json)?,
        None => FormatOptions::default(),
    };
    let ctx = Context::with_options(options);
    let person = Person::describe_type();

    let mom = Person::new("mom", 30, None);
    let kid = Person::new("kid", 5, Some(Rc::clone(&mom)));

    let nested = make_snapshot_as_subclass(
        &Value::object(&kid),
        &person,
        None,
        std::slice::from_ref(&person),
    )?;
    println!("{}", nested.render(&ctx)?);

    let canned = CannedRepresentations::new().with(&mom, Expr::return_variable("mom"));
    let with_canned = make_snapshot_as_subclass(
        &Value::object(&kid),
        &person,
        Some(&canned),
        std::slice::from_ref(&person),
    )?;
    println!("{}", with_canned.render(&ctx)?);

    // mom becomes her own grandmother
    *mom.mother.borrow_mut() = Some(Rc::clone(&kid));
    let cyclic = make_snapshot_as_subclass(
        &Value::object(&kid),
        &person,
        None,
        std::slice::from_ref(&person),
    )?;
    match cyclic.render(&ctx) {
        Ok(text) => println!("{text}"),
        Err(report) => info!("Cycle reported as expected: {}", report.current_context()),
    }
    *mom.mother.borrow_mut() = None;

    Ok(())
}

fn main() {
    TracingLevel::init_tracing();

    if let Err(report) = run() {
        error!("{report:?}");
        std::process::exit(1);
    }
}
