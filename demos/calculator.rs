//! A pocket calculator modeled as a finite state machine. The current state
//! is a `TagMap` of transition edges keyed by input token types; entering a
//! state overwrites the edges for the tokens it treats differently. The
//! evaluation loop parses one keypress to a wrapped token, loads the edge
//! for its tag, and dispatches.
//!
//! Operator keys parse to `KeyOp` values, functions sharing one alias type.
//! All four operators therefore share one tag, and one edge handles them.

use tagmap::{Entry, TagMap, Wrapped};

struct KeyClear;
struct KeyEq;
type KeyNum = i32;
type KeyOp = fn(&mut Calc) -> Result<(), String>;

type EdgeFn = fn(&mut Calc, Wrapped);

struct Calc {
    state: TagMap<EdgeFn>,
    acc: i32,
    res: i32,
    op: KeyOp,
}

impl Calc {
    fn new() -> Self {
        let mut c = Calc {
            state: TagMap::with_entries([
                Entry::new::<KeyClear>(clear as EdgeFn),
                Entry::new::<KeyEq>(eq as EdgeFn),
            ]),
            acc: 0,
            res: 0,
            op: Calc::add,
        };
        c.reset();
        c.enter_start();
        c
    }

    // STATES

    fn enter_start(&mut self) {
        self.state.store([
            Entry::new::<KeyOp>(eval as EdgeFn),
            Entry::new::<KeyNum>(begin_acc as EdgeFn),
        ]);
    }

    fn enter_accumulate(&mut self) {
        self.state.store([
            Entry::new::<KeyOp>(eval as EdgeFn),
            Entry::new::<KeyNum>(acc as EdgeFn),
        ]);
    }

    fn enter_evaluated(&mut self) {
        self.state.store([
            Entry::new::<KeyOp>(set_op as EdgeFn),
            Entry::new::<KeyNum>(reset_acc as EdgeFn),
        ]);
    }

    fn enter_err(&mut self) {
        self.state.store([
            Entry::new::<KeyOp>(nop as EdgeFn),
            Entry::new::<KeyNum>(nop as EdgeFn),
        ]);
    }

    // METHODS

    fn evaluate(&mut self) -> Result<(), String> {
        print!("\n> ");
        let op = self.op;
        if let Err(err) = op(self) {
            println!("{}", err);
            return Err(err);
        }
        println!("{:8}", self.res);
        Ok(())
    }

    fn reset(&mut self) {
        self.acc = 0;
        self.res = 0;
        self.op = Calc::add;
    }

    fn add(&mut self) -> Result<(), String> {
        self.res += self.acc;
        Ok(())
    }

    fn sub(&mut self) -> Result<(), String> {
        self.res -= self.acc;
        Ok(())
    }

    fn mul(&mut self) -> Result<(), String> {
        self.res *= self.acc;
        Ok(())
    }

    fn div(&mut self) -> Result<(), String> {
        if self.acc == 0 {
            return Err("DIVZERO!".to_string());
        }
        self.res /= self.acc;
        Ok(())
    }
}

// EDGES

fn clear(c: &mut Calc, _sym: Wrapped) {
    c.reset();
    c.enter_start();
}

fn eq(c: &mut Calc, _sym: Wrapped) {
    if c.evaluate().is_err() {
        c.enter_err();
        return;
    }
    c.enter_evaluated();
}

fn eval(c: &mut Calc, sym: Wrapped) {
    if c.evaluate().is_err() {
        c.enter_err();
        return;
    }
    set_op(c, sym);
}

fn set_op(c: &mut Calc, sym: Wrapped) {
    c.op = sym.must_unwrap::<KeyOp>();
    c.enter_start();
}

fn acc(c: &mut Calc, sym: Wrapped) {
    let digit = sym.must_unwrap::<KeyNum>();
    c.acc = c.acc * 10 + digit;
    c.enter_accumulate();
}

fn begin_acc(c: &mut Calc, sym: Wrapped) {
    let digit = sym.must_unwrap::<KeyNum>();
    if digit == 0 {
        return;
    }
    c.acc = digit;
    c.enter_accumulate();
}

fn reset_acc(c: &mut Calc, sym: Wrapped) {
    c.reset();
    begin_acc(c, sym);
}

fn nop(_c: &mut Calc, _sym: Wrapped) {}

// PARSING

fn parse_key(r: char) -> Wrapped {
    print!("{}", r);

    match r {
        'C' => Wrapped::new(KeyClear),
        '=' => Wrapped::new(KeyEq),
        '+' => Wrapped::new(Calc::add as KeyOp),
        '-' => Wrapped::new(Calc::sub as KeyOp),
        '*' => Wrapped::new(Calc::mul as KeyOp),
        '/' => Wrapped::new(Calc::div as KeyOp),
        '0'..='9' => Wrapped::new(r as KeyNum - '0' as KeyNum),
        _ => Wrapped::new(KeyClear),
    }
}

fn calculate(input: &str) {
    let mut c = Calc::new();

    for r in input.chars() {
        let sym = parse_key(r);
        if let Some(edge) = c.state.load_by_tag(sym.tag()).copied() {
            edge(&mut c, sym);
        }
    }
    println!();
}

fn main() {
    calculate("1+2*3=-4=C/=-5C-56=7+8=9=");
}
