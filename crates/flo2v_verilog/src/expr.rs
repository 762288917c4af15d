//! Per-operation Verilog text.
//!
//! [`ExprEmitter`] turns one operation into the right-hand side of a
//! continuous assignment, or into a statement of the clocked block. Widths
//! are only consulted where the emitted text depends on them, but every
//! non-constant node an operation touches must have one; see
//! [`ExprEmitter::check_widths`].

use crate::error::GenError;
use crate::names::node_name;
use flo2v_config::Log2Base;
use flo2v_ir::{Graph, NodeId, OpKind, Opcode, Operation, ShiftOp};

/// Renders operations of one graph.
#[derive(Debug, Clone, Copy)]
pub struct ExprEmitter<'g> {
    graph: &'g Graph,
    reset_port: &'g str,
    log2_base: Log2Base,
}

impl<'g> ExprEmitter<'g> {
    /// Creates an emitter. `reset_port` is the module's reset input, which
    /// `rst` operations are tied to.
    pub fn new(graph: &'g Graph, reset_port: &'g str, log2_base: Log2Base) -> Self {
        Self {
            graph,
            reset_port,
            log2_base,
        }
    }

    /// The Verilog reference for a node.
    pub fn name(&self, id: NodeId) -> String {
        node_name(self.graph.node(id))
    }

    /// The resolved width of a node, or an error naming the opcode that needed it.
    pub fn width(&self, id: NodeId, opcode: Opcode) -> Result<u32, GenError> {
        let node = self.graph.node(id);
        match node.width {
            Some(0) => Err(GenError::ZeroWidth {
                node: node.name.clone(),
            }),
            Some(width) => Ok(width),
            None => Err(GenError::UnresolvedWidth {
                node: node.name.clone(),
                opcode,
            }),
        }
    }

    /// Fails if the destination or any non-constant operand of `op` has no width.
    ///
    /// Unsized constants are exempt and render as bare literals.
    pub fn check_widths(&self, op: &Operation) -> Result<(), GenError> {
        let opcode = op.opcode();
        for id in std::iter::once(op.dest).chain(op.operands()) {
            if !self.graph.node(id).is_const {
                self.width(id, opcode)?;
            }
        }
        Ok(())
    }

    /// The `[W-1:0]` range of a node's declaration.
    pub fn range(&self, id: NodeId, opcode: Opcode) -> Result<String, GenError> {
        Ok(format!("[{}:0]", self.width(id, opcode)? - 1))
    }

    /// `assign <dest> = <expr>;` for a wire-bucket or `out` operation.
    pub fn assign(&self, op: &Operation) -> Result<String, GenError> {
        Ok(format!("assign {} = {};", self.name(op.dest), self.expr(op)?))
    }

    /// The right-hand side of a continuous assignment.
    pub fn expr(&self, op: &Operation) -> Result<String, GenError> {
        let opcode = op.opcode();
        let text = match op.kind {
            OpKind::Binary { op, left, right } => {
                format!("{} {} {}", self.name(left), op.symbol(), self.name(right))
            }
            OpKind::Unary { op, src } => format!("{}{}", op.symbol(), self.name(src)),
            OpKind::Move { src } | OpKind::Output { src } => self.name(src),
            OpKind::Shift { op: shift, src, amount } => {
                self.shift(shift, op.dest, src, amount, opcode)?
            }
            OpKind::Concat { high, low, .. } => {
                format!("{{{}, {}}}", self.name(high), self.name(low))
            }
            OpKind::Mux {
                cond,
                then_val,
                else_val,
            } => format!(
                "({}) ? {} : {}",
                self.name(cond),
                self.name(then_val),
                self.name(else_val)
            ),
            OpKind::Log2 { src } => self.log2(op.dest, src, opcode)?,
            OpKind::Read { mem, addr, .. } => format!("{}[{}]", self.name(mem), self.name(addr)),
            OpKind::Reset => self.reset_port.to_string(),
            OpKind::Input
            | OpKind::Memory { .. }
            | OpKind::Write { .. }
            | OpKind::Init { .. }
            | OpKind::Register { .. } => {
                return Err(GenError::NotCombinational {
                    opcode,
                    node: self.graph.node(op.dest).name.clone(),
                })
            }
        };
        Ok(text)
    }

    fn shift(
        &self,
        shift: ShiftOp,
        dest: NodeId,
        src: NodeId,
        amount: NodeId,
        opcode: Opcode,
    ) -> Result<String, GenError> {
        let amount_node = self.graph.node(amount);
        if shift != ShiftOp::Lsh && amount_node.is_const {
            let start = amount_node
                .name
                .parse::<u64>()
                .map_err(|_| GenError::InvalidConstant {
                    node: amount_node.name.clone(),
                    opcode,
                })?;
            return self.selection(dest, src, start, opcode);
        }

        let src_width = self.width(src, opcode)?;
        let dest_width = self.width(dest, opcode)?;
        let operand = if !amount_node.is_const && src_width < dest_width {
            format!("{{{}'d0, {}}}", dest_width - src_width, self.name(src))
        } else {
            self.name(src)
        };
        Ok(format!("{operand} {} {}", shift.symbol(), self.name(amount)))
    }

    /// Bits `start..` of `src`, zero-extended to the destination width.
    pub fn selection(
        &self,
        dest: NodeId,
        src: NodeId,
        start: u64,
        opcode: Opcode,
    ) -> Result<String, GenError> {
        let src_width = u64::from(self.width(src, opcode)?);
        let dest_width = u64::from(self.width(dest, opcode)?);
        let name = self.name(src);

        if start >= src_width {
            return Ok(format!("{dest_width}'d0"));
        }
        // Both terms are below 2^32 here.
        let end = start + dest_width;
        if end <= src_width {
            Ok(format!("{name}[{}:{start}]", end - 1))
        } else {
            let extend = end - src_width;
            Ok(format!("{{{extend}'d0, {name}[{}:{start}]}}", src_width - 1))
        }
    }

    /// A priority encoder over the bits of `src`, highest bit first.
    fn log2(&self, dest: NodeId, src: NodeId, opcode: Opcode) -> Result<String, GenError> {
        let src_width = self.width(src, opcode)?;
        let dest_width = self.width(dest, opcode)?;
        let name = self.name(src);

        let mut text = format!("{dest_width}'d{}", self.log2_base.default_value());
        for bit in self.log2_base.first_bit()..src_width {
            text = format!("({name}[{bit}]) ? {dest_width}'d{bit} : ({text})");
        }
        Ok(text)
    }

    /// `<reg> <= <reset value>;` for the reset branch.
    pub fn register_reset(&self, op: &Operation) -> Option<String> {
        match op.kind {
            OpKind::Register { reset_value, .. } => Some(format!(
                "{} <= {};",
                self.name(op.dest),
                self.name(reset_value)
            )),
            _ => None,
        }
    }

    /// `<reg> <= <next>;` for the run branch.
    pub fn register_next(&self, op: &Operation) -> Option<String> {
        match op.kind {
            OpKind::Register { next, .. } => {
                Some(format!("{} <= {};", self.name(op.dest), self.name(next)))
            }
            _ => None,
        }
    }

    /// `if (<en>) <mem>[<addr>] <= <value>;` for a memory write.
    pub fn write(&self, op: &Operation) -> Option<String> {
        match op.kind {
            OpKind::Write {
                enable,
                mem,
                addr,
                value,
            } => Some(format!(
                "if ({}) {}[{}] <= {};",
                self.name(enable),
                self.name(mem),
                self.name(addr),
                self.name(value)
            )),
            _ => None,
        }
    }

    /// `<mem>[<addr>] <= <value>;` for a memory initializer.
    ///
    /// The address is printed as the raw literal so it reads as a plain index.
    pub fn init(&self, op: &Operation) -> Option<String> {
        match op.kind {
            OpKind::Init { mem, addr, value } => Some(format!(
                "{}[{}] <= {};",
                self.name(mem),
                self.graph.node(addr).name,
                self.name(value)
            )),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flo2v_ir::{parse_flo, GraphBuilder};

    fn assign_of(source: &str, dest: &str) -> String {
        assign_with(source, dest, Log2Base::One)
    }

    fn assign_with(source: &str, dest: &str, base: Log2Base) -> String {
        let g = parse_flo(source).unwrap();
        let e = ExprEmitter::new(&g, "Top_reset", base);
        let op = g
            .ops
            .values()
            .find(|op| g.node(op.dest).name == dest)
            .unwrap();
        e.check_widths(op).unwrap();
        e.assign(op).unwrap()
    }

    fn err_of(source: &str, dest: &str) -> GenError {
        let g = parse_flo(source).unwrap();
        let e = ExprEmitter::new(&g, "Top_reset", Log2Base::One);
        let op = g
            .ops
            .values()
            .find(|op| g.node(op.dest).name == dest)
            .unwrap();
        e.check_widths(op).and_then(|_| e.assign(op)).unwrap_err()
    }

    const INPUTS: &str = "Top:a = in/4\nTop:b = in/4\nTop:s = in/1\n";

    #[test]
    fn binary_operators() {
        let src = format!("{INPUTS}Top:x = add/4 Top:a Top:b\nTop:y = gte/1 Top:a Top:b\n");
        assert_eq!(assign_of(&src, "Top:x"), "assign x = a + b;");
        assert_eq!(assign_of(&src, "Top:y"), "assign y = a >= b;");
    }

    #[test]
    fn binary_with_sized_constant() {
        let src = format!("{INPUTS}Top:x = sub/4 Top:a 1'4\n");
        assert_eq!(assign_of(&src, "Top:x"), "assign x = a - 4'd1;");
    }

    #[test]
    fn unary_and_move() {
        let src = format!("{INPUTS}Top:n = not/4 Top:a\nTop:m = neg/4 Top:a\nTop:c = mov/4 Top:b\n");
        assert_eq!(assign_of(&src, "Top:n"), "assign n = ~a;");
        assert_eq!(assign_of(&src, "Top:m"), "assign m = -a;");
        assert_eq!(assign_of(&src, "Top:c"), "assign c = b;");
    }

    #[test]
    fn concat_high_first() {
        let src = format!("{INPUTS}Top:c = cat/8 Top:a Top:b\nTop:d = catd/8 Top:b Top:a\n");
        assert_eq!(assign_of(&src, "Top:c"), "assign c = {a, b};");
        assert_eq!(assign_of(&src, "Top:d"), "assign d = {b, a};");
    }

    #[test]
    fn mux_expression() {
        let src = format!("{INPUTS}Top:m = mux/4 Top:s Top:a Top:b\n");
        assert_eq!(assign_of(&src, "Top:m"), "assign m = (s) ? a : b;");
    }

    #[test]
    fn rsh_constant_is_selection() {
        let src = "Top:x = in/8\nTop:y = rsh/4 Top:x 2\n";
        assert_eq!(assign_of(src, "Top:y"), "assign y = x[5:2];");
    }

    #[test]
    fn selection_overhang_zero_extends() {
        let src = "Top:x = in/4\nTop:y = rshd/4 Top:x 2\n";
        assert_eq!(assign_of(src, "Top:y"), "assign y = {2'd0, x[3:2]};");
    }

    #[test]
    fn selection_past_source_is_zero() {
        let src = "Top:x = in/4\nTop:y = arsh/3 Top:x 6\n";
        assert_eq!(assign_of(src, "Top:y"), "assign y = 3'd0;");
    }

    #[test]
    fn selection_offset_at_u64_max_is_zero() {
        let src = "Top:x = in/4\nTop:y = rsh/4 Top:x 18446744073709551615\n";
        assert_eq!(assign_of(src, "Top:y"), "assign y = 4'd0;");
    }

    #[test]
    fn offset_beyond_u64_is_invalid() {
        let err = err_of("Top:x = in/4\nTop:y = rsh/4 Top:x 18446744073709551616\n", "Top:y");
        assert!(matches!(err, GenError::InvalidConstant { .. }));
    }

    #[test]
    fn sized_shift_amount_still_selects() {
        let src = "Top:x = in/8\nTop:y = rsh/8 Top:x 0'3\n";
        assert_eq!(assign_of(src, "Top:y"), "assign y = x[7:0];");
    }

    #[test]
    fn dynamic_right_shifts() {
        let src = "Top:x = in/8\nTop:k = in/3\nTop:y = rsh/8 Top:x Top:k\nTop:z = arsh/8 Top:x Top:k\n";
        assert_eq!(assign_of(src, "Top:y"), "assign y = x >> k;");
        assert_eq!(assign_of(src, "Top:z"), "assign z = x >>> k;");
    }

    #[test]
    fn dynamic_shift_extends_narrow_source() {
        let src = "Top:x = in/4\nTop:k = in/3\nTop:y = lsh/8 Top:x Top:k\nTop:z = rshd/8 Top:x Top:k\n";
        assert_eq!(assign_of(src, "Top:y"), "assign y = {4'd0, x} << k;");
        assert_eq!(assign_of(src, "Top:z"), "assign z = {4'd0, x} >> k;");
    }

    #[test]
    fn constant_left_shift_not_extended() {
        let src = "Top:x = in/4\nTop:y = lsh/8 Top:x 2\n";
        assert_eq!(assign_of(src, "Top:y"), "assign y = x << 2;");
    }

    #[test]
    fn log2_default_base() {
        let src = "Top:x = in/4\nTop:l = log2/2 Top:x\n";
        assert_eq!(
            assign_of(src, "Top:l"),
            "assign l = (x[3]) ? 2'd3 : ((x[2]) ? 2'd2 : (2'd1));"
        );
    }

    #[test]
    fn log2_zero_base() {
        let src = "Top:x = in/3\nTop:l = log2/2 Top:x\n";
        assert_eq!(
            assign_with(src, "Top:l", Log2Base::Zero),
            "assign l = (x[2]) ? 2'd2 : ((x[1]) ? 2'd1 : (2'd0));"
        );
    }

    #[test]
    fn read_and_reset() {
        let src = "Top:ram = mem/8 16\nTop:ad = in/4\nTop:q = rd/8 1'1 Top:ram Top:ad\nTop:r = rst/1\n";
        assert_eq!(assign_of(src, "Top:q"), "assign q = ram[ad];");
        assert_eq!(assign_of(src, "Top:r"), "assign r = Top_reset;");
    }

    #[test]
    fn unresolved_width_names_node_and_opcode() {
        let err = err_of("Top:a = in/4\nTop:x = add Top:a Top:a\n", "Top:x");
        match err {
            GenError::UnresolvedWidth { node, opcode } => {
                assert_eq!(node, "Top:x");
                assert_eq!(opcode, Opcode::Add);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unsized_constant_operand_allowed() {
        let src = "Top:a = in/4\nTop:x = add/4 Top:a 3\n";
        assert_eq!(assign_of(src, "Top:x"), "assign x = a + 3;");
    }

    #[test]
    fn non_numeric_selection_offset() {
        let mut b = GraphBuilder::new();
        let x = b.signal("Top:x", 8);
        let y = b.signal("Top:y", 4);
        let k = b.constant("two", Some(3));
        b.push(x, OpKind::Input);
        b.push(
            y,
            OpKind::Shift {
                op: ShiftOp::Rsh,
                src: x,
                amount: k,
            },
        );
        let g = b.build();
        let e = ExprEmitter::new(&g, "Top_reset", Log2Base::One);
        let op = g.ops.values().last().unwrap();
        assert!(matches!(
            e.expr(op),
            Err(GenError::InvalidConstant { .. })
        ));
    }

    #[test]
    fn clocked_ops_have_no_assignment() {
        let mut b = GraphBuilder::new();
        let r = b.signal("Top:r", 4);
        let z = b.constant("0", Some(4));
        b.push(
            r,
            OpKind::Register {
                reset_value: z,
                next: r,
            },
        );
        let g = b.build();
        let e = ExprEmitter::new(&g, "Top_reset", Log2Base::One);
        let op = g.ops.values().next().unwrap();
        assert!(matches!(
            e.expr(op),
            Err(GenError::NotCombinational {
                opcode: Opcode::Reg,
                ..
            })
        ));
        assert_eq!(e.register_reset(op).unwrap(), "r <= 4'd0;");
        assert_eq!(e.register_next(op).unwrap(), "r <= r;");
    }

    #[test]
    fn write_and_init_statements() {
        let src = "Top:ram = mem/8 4\nTop:en = in/1\nTop:d = in/8\n\
                   Top:w = wr/1 Top:en Top:ram 1'2 Top:d\nTop:i = init/1 Top:ram 3'2 7'8\n";
        let g = parse_flo(src).unwrap();
        let e = ExprEmitter::new(&g, "Top_reset", Log2Base::One);
        let wr = g.ops.values().find(|op| op.opcode() == Opcode::Wr).unwrap();
        let init = g.ops.values().find(|op| op.opcode() == Opcode::Init).unwrap();
        assert_eq!(e.write(wr).unwrap(), "if (en) ram[2'd1] <= d;");
        assert_eq!(e.init(init).unwrap(), "ram[3] <= 8'd7;");
        assert!(e.write(init).is_none());
    }
}
