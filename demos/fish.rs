//! A dispatch table: a `TagMap` of functions keyed by the types they handle,
//! driven by the tags of incoming wrapped values.

use tagmap::{Entry, TagMap, Wrapped};

struct Fish(String);

struct Octopus {
    arms: usize,
}

type SlapFn = fn(&Wrapped) -> String;

fn main() {
    let marine_life_slap: TagMap<SlapFn> = TagMap::with_entries([
        Entry::new::<Fish>((|sym: &Wrapped| {
            let fish = sym.unwrap_ref::<Fish>().expect("keyed by fish tag");
            format!("{}slap", fish.0)
        }) as SlapFn),
        Entry::new::<Octopus>((|sym: &Wrapped| {
            let octopus = sym.unwrap_ref::<Octopus>().expect("keyed by octopus tag");
            "octoslap".repeat(octopus.arms)
        }) as SlapFn),
    ]);

    let symbols = [
        Wrapped::new(Fish("trout".to_string())),
        Wrapped::new(Fish("salmon".to_string())),
        Wrapped::new(Octopus { arms: 8 }),
    ];

    for sym in &symbols {
        let slap = marine_life_slap
            .load_by_tag(sym.tag())
            .expect("all marine life registered");
        println!("boom! {}!", slap(sym));
    }
}
