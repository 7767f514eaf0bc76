use crate::cpu::{execute, Core, Machine, RegisterDump, RunSummary, StackDump};
use crate::isa::{parse_instruction, Opcode, OperandKind, Program};
use crate::maths::Flags;
use crate::memory::{Dram, Memory};
use crate::reg::{Location, Register, View};
use crate::{Error, Fault, Field};
use proptest::prelude::*;

const BASE: u64 = 0x400000;
const SLOT: u64 = 64;

fn machine(lines: &[&str]) -> Machine<Dram> {
    let program = Program::new(BASE, SLOT, lines.iter().copied()).unwrap();

    Machine::new(Core::new(BASE), Dram::default(), program)
}

fn slot(index: u64) -> u64 {
    BASE + index * SLOT
}

macro_rules! flags {
    ($cf: expr, $zf: expr, $sf: expr, $of: expr) => {
        Flags {
            cf: $cf != 0,
            zf: $zf != 0,
            sf: $sf != 0,
            of: $of != 0,
        }
    };
}

#[test]
fn add_registers() {
    let mut m = machine(&["add %rbx, %rax"]);
    m.core_mut().registers.set(Register::A, 5);
    m.core_mut().registers.set(Register::B, 3);

    m.step().unwrap();

    assert_eq!(m.core().registers.get(Register::A), 8);
    assert_eq!(m.core().registers.get(Register::B), 3);
    assert!(m.core().flags.is_clear());
    assert_eq!(m.core().rip, slot(1));
}

#[test]
fn add_sets_overflow_flags() {
    let mut m = machine(&["add %rbx, %rax"]);
    m.core_mut().registers.set(Register::A, 0x7FFF_FFFF_FFFF_FFFF);
    m.core_mut().registers.set(Register::B, 1);

    m.step().unwrap();

    assert_eq!(m.core().registers.get(Register::A), 0x8000_0000_0000_0000);
    assert_eq!(m.core().flags, flags!(0, 0, 1, 1));
}

#[test]
fn add_writes_through_destination_view() {
    let mut m = machine(&["add %bl, %ah"]);
    m.core_mut().registers.set(Register::A, 0x1111_1111_1111_0211);
    m.core_mut().registers.set(Register::B, 0x03);

    m.step().unwrap();

    assert_eq!(m.core().registers.get(Register::A), 0x1111_1111_1111_0511);
}

#[test]
fn sub_immediate() {
    let mut m = machine(&["sub $0x1,%rax"]);

    m.step().unwrap();

    assert_eq!(m.core().registers.get(Register::A), u64::MAX);
    assert_eq!(m.core().flags, flags!(1, 0, 1, 0));
    assert_eq!(m.core().rip, slot(1));
}

#[test]
fn cmp_sets_flags_without_writing() {
    let mut m = machine(&["cmpq $0x5,0x1000"]);
    m.memory_mut().write_virtual(0x1000, 5);

    m.step().unwrap();

    assert_eq!(m.memory().read_virtual(0x1000), 5);
    assert_eq!(m.core().flags, flags!(0, 1, 0, 0));
    assert_eq!(m.core().rip, slot(1));
}

#[test]
fn cmp_borrow() {
    let mut m = machine(&["cmp $0x8,(%rbx)"]);
    m.core_mut().registers.set(Register::B, 0x2000);
    m.memory_mut().write_virtual(0x2000, 3);

    m.step().unwrap();

    assert_eq!(m.core().flags, flags!(1, 0, 1, 0));
}

#[test]
fn mov_forms() {
    let mut m = machine(&[
        "mov $0x1122334455667788, %rax",
        "mov %rax, %rbx",
        "mov %rbx, 0x1000",
        "mov 0x1000, %rcx",
        "mov $-1, %edx",
    ]);
    m.core_mut().flags.zf = true;

    m.run(5).unwrap();

    let registers = &m.core().registers;
    assert_eq!(registers.get(Register::A), 0x1122334455667788);
    assert_eq!(registers.get(Register::B), 0x1122334455667788);
    assert_eq!(m.memory().read_virtual(0x1000), 0x1122334455667788);
    assert_eq!(registers.get(Register::C), 0x1122334455667788);
    assert_eq!(registers.get(Register::D), 0x0000_0000_FFFF_FFFF);
    assert!(m.core().flags.is_clear());
    assert_eq!(m.core().rip, slot(5));
}

#[test]
fn mov_narrow_views_and_memory() {
    let mut m = machine(&["mov %ax, 0x1000", "mov 0x1008, %bl", "mov %ah, %ch"]);
    m.core_mut().registers.set(Register::A, 0xAAAA_BBBB_CCCC_DDEE);
    m.core_mut().registers.set(Register::B, 0xFFFF_FFFF_FFFF_FFFF);
    m.memory_mut().write_virtual(0x1000, u64::MAX);
    m.memory_mut().write_virtual(0x1008, 0x1234);

    m.run(3).unwrap();

    assert_eq!(m.memory().read_virtual(0x1000), 0xDDEE);
    assert_eq!(m.core().registers.get(Register::B), 0xFFFF_FFFF_FFFF_FF34);
    assert_eq!(m.core().registers.get(Register::C), 0xDD00);
}

#[test]
fn push_then_pop() {
    let mut m = machine(&["push %rbp", "pop %rbx"]);
    m.core_mut().registers.set(Register::BP, 0xDEAD);
    m.core_mut().set_rsp(0x8000);

    m.step().unwrap();

    assert_eq!(m.core().rsp(), 0x7FF8);
    assert_eq!(m.memory().read_virtual(0x7FF8), 0xDEAD);

    m.step().unwrap();

    assert_eq!(m.core().rsp(), 0x8000);
    assert_eq!(m.core().registers.get(Register::B), 0xDEAD);
    assert_eq!(m.core().rip, slot(2));
}

#[test]
fn push_rsp_stores_old_value() {
    let mut m = machine(&["push %rsp"]);
    m.core_mut().set_rsp(0x8000);

    m.step().unwrap();

    assert_eq!(m.memory().read_virtual(0x7FF8), 0x8000);
}

proptest! {
    #[test]
    fn push_pop_inverse(value: u64, rsp in 0x100u64..0x10000, reg in 0usize..16) {
        let register = Register::ALL[reg];
        prop_assume!(register != Register::SP);

        let name = Location::quad(register).to_string();
        let push = format!("push {}", name);
        let pop = format!("pop {}", name);
        let mut m = machine(&[push.as_str(), pop.as_str()]);
        m.core_mut().set_rsp(rsp);
        m.core_mut().registers.set(register, value);

        m.step().unwrap();
        m.core_mut().registers.set(register, !value);
        m.step().unwrap();

        prop_assert_eq!(m.core().registers.get(register), value);
        prop_assert_eq!(m.core().rsp(), rsp);
    }
}

#[test]
fn call_then_ret() {
    let mut m = machine(&["callq 0x400080", "mov $0x1, %rax", "retq"]);
    m.core_mut().set_rsp(0x8000);
    m.core_mut().flags.cf = true;

    m.step().unwrap();

    assert_eq!(m.core().rip, slot(2));
    assert_eq!(m.core().rsp(), 0x7FF8);
    assert_eq!(m.memory().read_virtual(0x7FF8), slot(1));
    assert!(m.core().flags.is_clear());

    m.step().unwrap();

    assert_eq!(m.core().rip, slot(1));
    assert_eq!(m.core().rsp(), 0x8000);
}

#[test]
fn call_through_memory_operand() {
    let mut m = machine(&["call (%rax)"]);
    m.core_mut().registers.set(Register::A, 0x400100);
    m.core_mut().set_rsp(0x8000);

    m.step().unwrap();

    assert_eq!(m.core().rip, 0x400100);
}

#[test]
fn leave() {
    let mut m = machine(&["leaveq"]);
    m.core_mut().registers.set(Register::BP, 0x2000);
    m.core_mut().set_rsp(0x1F00);
    m.memory_mut().write_virtual(0x2000, 0x3000);

    m.step().unwrap();

    assert_eq!(m.core().rsp(), 0x2008);
    assert_eq!(m.core().registers.get(Register::BP), 0x3000);
    assert_eq!(m.core().rip, slot(1));
}

#[test]
fn jne_taken_when_zero_flag_clear() {
    let mut m = machine(&["jne 0x400100"]);
    m.core_mut().flags.cf = true;

    m.step().unwrap();

    assert_eq!(m.core().rip, 0x400100);
    assert!(m.core().flags.is_clear());
}

#[test]
fn jne_falls_through_when_zero_flag_set() {
    let mut m = machine(&["jne 0x400100"]);
    m.core_mut().flags.zf = true;

    m.step().unwrap();

    assert_eq!(m.core().rip, slot(1));
    assert!(m.core().flags.is_clear());
}

#[test]
fn jmp_ignores_zero_flag() {
    for zf in &[false, true] {
        let mut m = machine(&["jmp 0x400100"]);
        m.core_mut().flags.zf = *zf;

        m.step().unwrap();

        assert_eq!(m.core().rip, 0x400100);
        assert!(m.core().flags.is_clear());
    }
}

#[test]
fn unsupported_form_changes_nothing() {
    let mut m = machine(&["add $0x1, %rax"]);
    m.core_mut().registers.set(Register::A, 7);
    m.core_mut().flags.sf = true;
    let before = m.core().clone();

    let fault = m.step().unwrap_err();

    assert_eq!(
        fault,
        Fault::new(
            BASE,
            "add $0x1, %rax",
            None,
            Error::UnsupportedOperandForm {
                opcode: Opcode::Add,
                src: OperandKind::Immediate,
                dst: OperandKind::Register,
            }
        )
    );
    assert_eq!(m.core(), &before);
}

#[test]
fn unsupported_forms() {
    for text in &[
        "mov 0x10, 0x20",
        "mov %rax, $0x1",
        "push $0x1",
        "push %rax, %rbx",
        "pop 0x1000",
        "leave %rax",
        "call %rax",
        "call",
        "ret $0x8",
        "sub %rbx, %rax",
        "cmp $0x1, %rax",
        "jne %rax",
        "jmp",
    ] {
        let mut core = Core::new(BASE);
        core.set_rsp(0x8000);
        let mut memory = Dram::default();
        let before = (core.clone(), memory.clone());
        let instruction = parse_instruction(text).unwrap();

        let result = execute(&mut core, &mut memory, SLOT, &instruction);

        assert!(
            matches!(result, Err(Error::UnsupportedOperandForm { .. })),
            "{}",
            text
        );
        assert_eq!((core, memory), before, "{}", text);
    }
}

#[test]
fn parse_faults_name_the_field() {
    let mut m = machine(&["mov %rxx, %rax", "movz %rax, %rbx"]);

    assert_eq!(
        m.step(),
        Err(Fault::new(
            BASE,
            "mov %rxx, %rax",
            Some(Field::Source),
            Error::UnknownRegisterName("%rxx".to_string())
        ))
    );

    m.core_mut().rip = slot(1);

    let fault = m.step().unwrap_err();
    assert_eq!(fault.field, Some(Field::Mnemonic));
    assert_eq!(fault.kind, Error::UnknownOpcode("movz".to_string()));
    assert_eq!(
        fault.to_string(),
        "fault at 0x400040 executing `movz %rax, %rbx` (in mnemonic): unknown mnemonic `movz`"
    );
}

#[test]
fn misaligned_fetch_faults() {
    let mut m = machine(&["retq"]);
    m.core_mut().rip = BASE + 4;

    assert!(!m.is_halted());
    assert_eq!(
        m.run(10),
        Err(Fault::new(BASE + 4, "", None, Error::NoInstruction(BASE + 4)))
    );
}

#[test]
fn run_stops_at_budget() {
    let mut m = machine(&["jmp 0x400000"]);

    assert_eq!(
        m.run(25),
        Ok(RunSummary {
            cycles: 25,
            halted: false
        })
    );
}

#[test]
fn run_with_observes_every_cycle() {
    let mut m = machine(&["mov $0x1, %rax", "mov $0x2, %rax", "mov $0x3, %rax"]);
    let mut seen = Vec::new();

    let summary = m
        .run_with(10, |m| seen.push(m.core().registers.get(Register::A)))
        .unwrap();

    assert_eq!(summary, RunSummary { cycles: 3, halted: true });
    assert_eq!(seen, vec![1, 2, 3]);
}

/// The caller and callee of a two-argument `add` function.
const ADD_PROGRAM: [&str; 15] = [
    "push   %rbp",
    "mov    %rsp,%rbp",
    "mov    %rdi,-0x18(%rbp)",
    "mov    %rsi,-0x20(%rbp)",
    "mov    -0x18(%rbp),%rdx",
    "mov    -0x20(%rbp),%rax",
    "add    %rdx,%rax",
    "mov    %rax,-0x8(%rbp)",
    "mov    -0x8(%rbp),%rax",
    "pop    %rbp",
    "retq",
    "mov    %rdx,%rsi",
    "mov    %rax,%rdi",
    "callq  0x00400000",
    "mov    %rax,-0x8(%rbp)",
];

#[test]
fn add_function_call() {
    let mut m = machine(&ADD_PROGRAM[..]);
    let core = m.core_mut();
    core.rip = slot(11);
    core.registers.set(Register::A, 0x12340000);
    core.registers.set(Register::B, 0x0);
    core.registers.set(Register::C, 0x8000660);
    core.registers.set(Register::D, 0xabcd);
    core.registers.set(Register::SI, 0x7ffffffee2f8);
    core.registers.set(Register::DI, 0x1);
    core.registers.set(Register::BP, 0x7ffffffee210);
    core.registers.set(Register::SP, 0x7ffffffee1f0);
    m.memory_mut().seed(vec![
        (0x7ffffffee210, 0x08000660),
        (0x7ffffffee208, 0x0),
        (0x7ffffffee200, 0xabcd),
        (0x7ffffffee1f8, 0x12340000),
        (0x7ffffffee1f0, 0x08000660),
    ]);

    let summary = m.run(100).unwrap();

    assert_eq!(summary, RunSummary { cycles: 15, halted: true });
    assert_eq!(m.core().registers.get(Register::A), 0x1234abcd);
    assert_eq!(m.core().registers.get(Register::BP), 0x7ffffffee210);
    assert_eq!(m.core().rsp(), 0x7ffffffee1f0);
    assert_eq!(m.memory().read_virtual(0x7ffffffee208), 0x1234abcd);
    assert_eq!(m.core().rip, slot(15));
}

#[test]
fn countdown_loop() {
    let mut m = machine(&[
        "mov    $0x3,%rax",
        "mov    %rax,0x1000",
        "mov    0x1000,%rax",
        "sub    $0x1,%rax",
        "mov    %rax,0x1000",
        "add    %rax,%rbx",
        "cmpq   $0x0,0x1000",
        "jne    0x400080",
    ]);

    let summary = m.run(1000).unwrap();

    assert_eq!(summary, RunSummary { cycles: 20, halted: true });
    assert_eq!(m.core().registers.get(Register::B), 3);
    assert_eq!(m.core().registers.get(Register::A), 0);
    assert_eq!(m.memory().read_virtual(0x1000), 0);
}

#[test]
fn register_dump() {
    let mut core = Core::new(0x400000);
    core.registers.set(Register::A, 0x1234abcd);
    core.flags.zf = true;

    let dump = RegisterDump(&core).to_string();
    let lines: Vec<&str> = dump.lines().collect();

    assert_eq!(lines.len(), 6);
    assert_eq!(
        lines[0],
        format!(
            "rax = {:16x}\trbx = {:16x}\trcx = {:16x}\trdx = {:16x}",
            0x1234abcd, 0, 0, 0
        )
    );
    assert!(lines[2].starts_with(" r8 = "));
    assert_eq!(lines[4], format!("rip = {:16x}", 0x400000));
    assert_eq!(lines[5], "CF = 0\tZF = 1\tSF = 0\tOF = 0");
}

#[test]
fn stack_dump() {
    let mut core = Core::new(0);
    core.set_rsp(0x100);
    let mut memory = Dram::new(0x1000);
    memory.write_virtual(0x100, 0xaa);
    memory.write_virtual(0x108, 0xbb);

    let dump = StackDump::new(&core, &memory, 2).to_string();
    let lines: Vec<&str> = dump.lines().collect();

    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], format!("0x{:016x} : {:16x}", 0x110, 0));
    assert_eq!(lines[1], format!("0x{:016x} : {:16x}", 0x108, 0xbb));
    assert_eq!(lines[2], format!("0x{:016x} : {:16x} <== rsp", 0x100, 0xaa));
    assert_eq!(lines[3], format!("0x{:016x} : {:16x}", 0xf8, 0));
}

#[test]
fn mov_immediate_into_extended_low_byte() {
    let mut m = machine(&["mov $0x7f, %r9b"]);
    m.core_mut().registers.set(Register::R9, 0xFF00);

    m.step().unwrap();

    assert_eq!(
        m.core().registers.read(Location::new(Register::R9, View::Word)),
        0xFF7F
    );
}
