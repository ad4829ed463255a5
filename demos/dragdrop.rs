//! Event dispatch over wrapped (op, src, dst) triples. Handlers are written
//! against concrete types and lifted to guards over wrapped events; a
//! handler fires only when all three payload tags match its signature.

use std::any::Any;
use std::sync::{Arc, Mutex};
use tagmap::Wrapped;

#[derive(Clone)]
struct MouseClick;

#[derive(Clone)]
struct MouseDrop;

#[derive(Clone)]
struct File {
    path: String,
    data: String,
}

struct Folder {
    path: String,
    locked: bool,
    files: Vec<File>,
}

type SharedFolder = Arc<Mutex<Folder>>;

struct Event {
    op: Wrapped,
    src: Wrapped,
    dst: Wrapped,
}

fn new_event<Op, Src, Dst>(op: Op, src: Src, dst: Dst) -> Event
where
    Op: Any + Send + Sync,
    Src: Any + Send + Sync,
    Dst: Any + Send + Sync,
{
    Event {
        op: Wrapped::new(op),
        src: Wrapped::new(src),
        dst: Wrapped::new(dst),
    }
}

fn lift_handler<Op, Src, Dst>(f: fn(&Op, &Src, &Dst) -> bool) -> impl Fn(&Event) -> bool
where
    Op: Any,
    Src: Any,
    Dst: Any,
{
    move |ev| {
        match (
            ev.op.unwrap_ref::<Op>(),
            ev.src.unwrap_ref::<Src>(),
            ev.dst.unwrap_ref::<Dst>(),
        ) {
            (Some(op), Some(src), Some(dst)) => f(op, src, dst),
            _ => false,
        }
    }
}

// HANDLERS

fn reject_locked_folder(ev: &Event) -> bool {
    let locked = |w: &Wrapped| {
        w.unwrap_ref::<SharedFolder>()
            .is_some_and(|dir| dir.lock().unwrap().locked)
    };
    locked(&ev.src) || locked(&ev.dst)
}

fn open_file(_: &MouseClick, f: &File, _: &()) -> bool {
    println!("{}:\n\t{}", f.path, f.data);
    true
}

fn list_files(_: &MouseClick, dir: &SharedFolder, _: &()) -> bool {
    let dir = dir.lock().unwrap();
    println!("{}:", dir.path);
    for f in &dir.files {
        println!("\t {}", f.path);
    }
    true
}

fn move_file(_: &MouseDrop, f: &File, dir: &SharedFolder) -> bool {
    dir.lock().unwrap().files.push(f.clone());
    true
}

fn main() {
    let photo = File {
        path: "tableflip.jif".to_string(),
        data: "(╯°□°)╯︵ ┻━┻".to_string(),
    };
    let home: SharedFolder = Arc::new(Mutex::new(Folder {
        path: "home".to_string(),
        locked: false,
        files: Vec::new(),
    }));
    let sys: SharedFolder = Arc::new(Mutex::new(Folder {
        path: "system".to_string(),
        locked: true,
        files: Vec::new(),
    }));

    let events = [
        new_event(MouseClick, Arc::clone(&sys), ()),
        new_event(MouseClick, photo.clone(), ()),
        new_event(MouseDrop, photo.clone(), Arc::clone(&home)),
        new_event(MouseDrop, photo, Arc::clone(&sys)),
        new_event(MouseClick, Arc::clone(&home), ()),
    ];

    let handlers: Vec<Box<dyn Fn(&Event) -> bool>> = vec![
        Box::new(lift_handler(open_file)),
        Box::new(lift_handler(list_files)),
        Box::new(lift_handler(move_file)),
    ];

    for ev in &events {
        if reject_locked_folder(ev) {
            continue;
        }
        for handler in &handlers {
            if handler(ev) {
                break;
            }
        }
    }
}
