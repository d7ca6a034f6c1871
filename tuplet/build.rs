use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::{env, error::Error};

/// Checked against `tuplets::MAX_FLAT_ARITY` and the shapes `impl_tuplets!` generates by the
/// assertions written to `ceiling.rs`.
const MAX_FLAT_ARITY: usize = 16;

fn main() -> Result<(), Box<dyn Error>> {
    let out_dir = env::var("OUT_DIR")?;

    // The ceiling lives in three places: here, in `tuplets::MAX_FLAT_ARITY`, and in the argument
    // to `impl_tuplets!`. Every build checks that they agree.
    let mut ceiling = File::create(Path::new(&out_dir).join("ceiling.rs"))?;
    let units = vec!["()"; MAX_FLAT_ARITY].join(", ");
    writeln!(
        ceiling,
        "static_assertions::const_assert_eq!(MAX_FLAT_ARITY, {});",
        MAX_FLAT_ARITY
    )?;
    writeln!(
        ceiling,
        "static_assertions::const_assert_eq!(<Tuplet{}<{}> as Tuplet>::FLAT_ARITY, {});",
        MAX_FLAT_ARITY, units, MAX_FLAT_ARITY
    )?;
    writeln!(
        ceiling,
        "static_assertions::const_assert_eq!(<Tuplet{}<{}, Tuplet1<()>> as Tuplet>::ARITY, {});",
        MAX_FLAT_ARITY + 1,
        units,
        MAX_FLAT_ARITY + 1
    )?;

    // We auto-generate a readback test for every flat arity, since the accessors for each arity
    // are generated separately and hand-written tests only ever cover a few of them.

    // Open a file to write to it in the output directory for the build
    let dest_path = Path::new(&out_dir).join("arity_readback.rs");
    let mut f = File::create(&dest_path)?;

    // File header
    writeln!(f, "use crate::tuplets::*;")?;
    writeln!(f)?;
    writeln!(f, "fn arity_of<T: Tuplet>(_: &T) -> usize {{")?;
    writeln!(f, "    T::ARITY")?;
    writeln!(f, "}}")?;

    for arity in 1..=MAX_FLAT_ARITY {
        let slots = (1..=arity).map(Slot).collect::<Vec<_>>();

        writeln!(f)?;
        writeln!(f, "#[test]")?;
        writeln!(f, "fn readback_arity_{}() {{", arity)?;
        writeln!(f, "    let t = Tuplet{}::new({});", arity, List(&slots))?;
        writeln!(f, "    assert_eq!(arity_of(&t), {});", arity)?;
        for slot in &slots {
            writeln!(f, "    assert_eq!(t.item{}(), &{});", slot.0, slot)?;
        }
        writeln!(
            f,
            "    assert_eq!(t.to_string(), {:?});",
            format!("({})", Rendered(&slots))
        )?;
        let bindings = slots.iter().map(|s| format!("v{}", s.0)).collect::<Vec<_>>();
        writeln!(
            f,
            "    let ({},) = t.into_tuple();",
            bindings.join(", ")
        )?;
        for (slot, binding) in slots.iter().zip(&bindings) {
            writeln!(f, "    assert_eq!({}, {});", binding, slot)?;
        }
        writeln!(f, "}}")?;
    }

    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}

/// The value placed in a slot: odd slots hold integers and even slots hold strings, so every
/// tuplet past arity one is heterogeneous.
#[derive(Clone, Copy, Debug)]
struct Slot(usize);

impl Display for Slot {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.0 % 2 == 1 {
            write!(f, "{}u64", self.0 * 10)
        } else {
            write!(f, "String::from(\"slot {}\")", self.0)
        }
    }
}

/// A comma-separated list of slot expressions.
struct List<'a>(&'a [Slot]);

impl Display for List<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (i, slot) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", slot)?;
        }
        Ok(())
    }
}

/// The expected `Display` output for a list of slots, without the parentheses.
struct Rendered<'a>(&'a [Slot]);

impl Display for Rendered<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        for (i, slot) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            if slot.0 % 2 == 1 {
                write!(f, "{}", slot.0 * 10)?;
            } else {
                write!(f, "slot {}", slot.0)?;
            }
        }
        Ok(())
    }
}
