//! Abstract syntax tree.
//!
//! A deliberately uniform tree: every node is a kind, an ordered list of
//! owned children and an optional interned payload. Productions attach their
//! subtrees by moving them into the parent; nothing is shared.
//!
//! Absent optional parts are represented by an `EMPTY` node so each kind has
//! a fixed child arity, which keeps positional access stable for later
//! passes.

use std::fmt::Write as _;

use crate::{Name, StringInterner};

/// Node kinds, each rendered by its canonical upper-case name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AstKind {
    Empty,

    // Compilation units
    DefMod,
    ImpMod,
    PgmMod,
    ImpList,
    Import,
    UnqImp,
    Block,
    DefList,
    DeclList,

    // Definitions and declarations
    ConstDef,
    TypeDef,
    VarDecl,
    ProcDef,
    ProcDecl,

    // Types
    Alias,
    QualIdent,
    Subrange,
    Enum,
    SetType,
    ArrayType,
    Record,
    ExtRecord,
    Pointer,
    ProcType,
    FormalTypeList,
    Opaque,
    FieldListSeq,
    FieldList,
    VariantFieldList,
    VariantList,
    Variant,

    // Formal parameters
    FParamList,
    FParams,
    ConstParams,
    VarParams,
    ArgList,
    CastParam,
    OpenArray,

    // Statements
    StmtSeq,
    Assign,
    PCall,
    If,
    ElsifList,
    Elsif,
    Case,
    CaseList,
    CaseBranch,
    CaseLabelList,
    Range,
    Loop,
    While,
    Repeat,
    For,
    Return,
    Exit,

    // Expressions
    Eq,
    Neq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Identity,
    In,
    Plus,
    Minus,
    Or,
    Mul,
    Divide,
    Div,
    Mod,
    And,
    Neg,
    Not,
    TypeConv,
    FCall,
    Args,
    Field,
    Index,
    Deref,
    StructVal,
    ExprList,

    // Terminals
    Ident,
    IdentList,
    IntVal,
    RealVal,
    ChrVal,
    QuotedVal,
}

impl AstKind {
    pub const fn name(self) -> &'static str {
        match self {
            AstKind::Empty => "EMPTY",
            AstKind::DefMod => "DEFMOD",
            AstKind::ImpMod => "IMPMOD",
            AstKind::PgmMod => "PGMMOD",
            AstKind::ImpList => "IMPLIST",
            AstKind::Import => "IMPORT",
            AstKind::UnqImp => "UNQIMP",
            AstKind::Block => "BLOCK",
            AstKind::DefList => "DEFLIST",
            AstKind::DeclList => "DECLLIST",
            AstKind::ConstDef => "CONSTDEF",
            AstKind::TypeDef => "TYPEDEF",
            AstKind::VarDecl => "VARDECL",
            AstKind::ProcDef => "PROCDEF",
            AstKind::ProcDecl => "PROCDECL",
            AstKind::Alias => "ALIAS",
            AstKind::QualIdent => "QUALIDENT",
            AstKind::Subrange => "SUBR",
            AstKind::Enum => "ENUM",
            AstKind::SetType => "SET",
            AstKind::ArrayType => "ARRAY",
            AstKind::Record => "RECORD",
            AstKind::ExtRecord => "EXTREC",
            AstKind::Pointer => "POINTER",
            AstKind::ProcType => "PROCTYPE",
            AstKind::FormalTypeList => "FTYPELIST",
            AstKind::Opaque => "OPAQUE",
            AstKind::FieldListSeq => "FIELDLISTSEQ",
            AstKind::FieldList => "FIELDLIST",
            AstKind::VariantFieldList => "VFIELDLIST",
            AstKind::VariantList => "VARIANTLIST",
            AstKind::Variant => "VARIANT",
            AstKind::FParamList => "FPARAMLIST",
            AstKind::FParams => "FPARAMS",
            AstKind::ConstParams => "CONSTP",
            AstKind::VarParams => "VARP",
            AstKind::ArgList => "ARGLIST",
            AstKind::CastParam => "CASTP",
            AstKind::OpenArray => "OPENARRAY",
            AstKind::StmtSeq => "STMTSEQ",
            AstKind::Assign => "ASSIGN",
            AstKind::PCall => "PCALL",
            AstKind::If => "IF",
            AstKind::ElsifList => "ELSIFLIST",
            AstKind::Elsif => "ELSIF",
            AstKind::Case => "CASE",
            AstKind::CaseList => "CASELIST",
            AstKind::CaseBranch => "CASEBRANCH",
            AstKind::CaseLabelList => "CLABELLIST",
            AstKind::Range => "RANGE",
            AstKind::Loop => "LOOP",
            AstKind::While => "WHILE",
            AstKind::Repeat => "REPEAT",
            AstKind::For => "FOR",
            AstKind::Return => "RETURN",
            AstKind::Exit => "EXIT",
            AstKind::Eq => "EQ",
            AstKind::Neq => "NEQ",
            AstKind::Lt => "LT",
            AstKind::LtEq => "LTEQ",
            AstKind::Gt => "GT",
            AstKind::GtEq => "GTEQ",
            AstKind::Identity => "IDTY",
            AstKind::In => "IN",
            AstKind::Plus => "PLUS",
            AstKind::Minus => "MINUS",
            AstKind::Or => "OR",
            AstKind::Mul => "MUL",
            AstKind::Divide => "DIVIDE",
            AstKind::Div => "DIV",
            AstKind::Mod => "MOD",
            AstKind::And => "AND",
            AstKind::Neg => "NEG",
            AstKind::Not => "NOT",
            AstKind::TypeConv => "TYPECONV",
            AstKind::FCall => "FCALL",
            AstKind::Args => "ARGS",
            AstKind::Field => "FIELD",
            AstKind::Index => "INDEX",
            AstKind::Deref => "DEREF",
            AstKind::StructVal => "STRUCTVAL",
            AstKind::ExprList => "EXPRLIST",
            AstKind::Ident => "IDENT",
            AstKind::IdentList => "IDENTLIST",
            AstKind::IntVal => "INTVAL",
            AstKind::RealVal => "REALVAL",
            AstKind::ChrVal => "CHRVAL",
            AstKind::QuotedVal => "QUOTEDVAL",
        }
    }
}

/// One node of the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AstNode {
    kind: AstKind,
    children: Vec<AstNode>,
    value: Option<Name>,
}

impl AstNode {
    /// Interior node owning `children`.
    pub fn new(kind: AstKind, children: Vec<AstNode>) -> Self {
        AstNode {
            kind,
            children,
            value: None,
        }
    }

    /// Terminal node carrying an interned payload.
    pub fn leaf(kind: AstKind, value: Name) -> Self {
        AstNode {
            kind,
            children: Vec::new(),
            value: Some(value),
        }
    }

    /// Childless node without payload, e.g. `EXIT` or `OPAQUE`.
    pub fn bare(kind: AstKind) -> Self {
        AstNode::new(kind, Vec::new())
    }

    /// Placeholder for an absent optional part.
    pub fn empty() -> Self {
        AstNode::bare(AstKind::Empty)
    }

    pub fn kind(&self) -> AstKind {
        self.kind
    }

    pub fn children(&self) -> &[AstNode] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&AstNode> {
        self.children.get(index)
    }

    pub fn value(&self) -> Option<Name> {
        self.value
    }

    pub fn is_empty(&self) -> bool {
        self.kind == AstKind::Empty
    }

    /// Append a child, used by list productions.
    pub fn push(&mut self, child: AstNode) {
        self.children.push(child);
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(AstNode::node_count).sum::<usize>()
    }

    /// Render as an S-expression: `(KIND child...)`, leaves as `(KIND "text")`.
    pub fn to_sexpr(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        self.write_sexpr(interner, &mut out);
        out
    }

    fn write_sexpr(&self, interner: &StringInterner, out: &mut String) {
        out.push('(');
        out.push_str(self.kind.name());
        if let Some(name) = self.value {
            let _ = write!(out, " \"{}\"", escape(interner.lookup(name)));
        }
        for child in &self.children {
            out.push(' ');
            child.write_sexpr(interner, out);
        }
        out.push(')');
    }
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
