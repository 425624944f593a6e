/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The program root and the closed statement/expression sum types
/// - expressions: Definitions for the expression node kinds
/// - statements: Definitions for the statement node kinds
/// - types: The declared/inferred type lattice used by the type checker
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
