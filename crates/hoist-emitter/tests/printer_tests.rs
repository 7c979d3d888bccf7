//! Printer output tests.

use hoist_emitter::Printer;
use hoist_parser::syntax::factory;
use hoist_parser::{NodeArena, SourceFile, node_flags};

fn print(text: &str) -> String {
    let source = SourceFile::parse("test.ts", text);
    assert!(
        source.diagnostics.is_empty(),
        "unexpected diagnostics: {:?}",
        source.diagnostics
    );
    Printer::print_source_file(&source)
}

/// Canonically formatted input prints back unchanged.
fn assert_stable(text: &str) {
    assert_eq!(print(text), text);
}

#[test]
fn prints_routes_module() {
    assert_stable(
        "import { Routes } from '@angular/router';\n\
         export const routes: Routes = [{ path: 'lazy', loadChildren: () => import('./lazy').then((m) => m.LazyModule) }];\n",
    );
}

#[test]
fn prints_decorated_class() {
    assert_stable(
        "@Component({ selector: 'app-root', providers: [{ provide: Token, useValue: 1 }] })\n\
         export class AppComponent extends Base implements OnInit {\n\
         \x20   @Input() name: string;\n\
         \x20   static count = 0;\n\
         \x20   constructor(private readonly http: Http, @Inject(TOKEN) value?: number) { }\n\
         \x20   get label(): string {\n\
         \x20       return this.name;\n\
         \x20   }\n\
         \x20   ngOnInit(): void { }\n\
         }\n",
    );
}

#[test]
fn prints_import_and_export_forms() {
    assert_stable(
        "import Default, { a, b as c } from './a';\n\
         import * as ns from './ns';\n\
         import './side-effect';\n\
         export { a, c as d };\n\
         export * from './all';\n\
         export { x } from './x';\n\
         export default ns;\n",
    );
}

#[test]
fn prints_operators() {
    assert_stable(
        "const a = 1 + 2 * (3 - b);\n\
         const c = typeof x === 'string' ? x : !y;\n\
         const d = - -e;\n\
         const f = g?.h ?? i[0];\n\
         let j = k as any;\n",
    );
}

#[test]
fn prints_type_declarations() {
    assert_stable(
        "export enum Color {\n\
         \x20   Red,\n\
         \x20   Green = 5\n\
         }\n\
         interface Shape<T> extends Base {\n\
         \x20   name: string;\n\
         \x20   area(scale?: number): T;\n\
         }\n\
         export type Id = string | (number | boolean)[];\n",
    );
}

#[test]
fn prints_function_with_control_flow() {
    assert_stable(
        "export function pick(a: number, ...rest: string[]): number {\n\
         \x20   if (a) {\n\
         \x20       return 1;\n\
         \x20   } else {\n\
         \x20       throw new Error('no');\n\
         \x20   }\n\
         }\n",
    );
}

#[test]
fn normalizes_quotes_and_layout() {
    assert_eq!(
        print("const s = \"it's\";   const o = {a:1,b};\nconst e = {};"),
        "const s = 'it\\'s';\nconst o = { a: 1, b };\nconst e = {};\n"
    );
}

#[test]
fn prints_synthesized_nodes() {
    let mut arena = NodeArena::new();
    let name = factory::create_identifier(&mut arena, "ɵ0");
    let value = factory::create_identifier(&mut arena, "x");
    let declaration = factory::create_variable_declaration(&mut arena, name, value);
    let list =
        factory::create_variable_declaration_list(&mut arena, vec![declaration], node_flags::CONST);
    let statement = factory::create_variable_statement(&mut arena, None, list);
    assert_eq!(Printer::print_node(&arena, statement), "const ɵ0 = x;");

    let aliased = factory::create_export_specifier(&mut arena, Some("y"), "ɵ1");
    let plain = factory::create_export_specifier(&mut arena, None, "ɵ0");
    let exports = factory::create_named_exports(&mut arena, vec![plain, aliased]);
    let export = factory::create_export_declaration(&mut arena, exports, hoist_parser::NodeIndex::NONE);
    assert_eq!(
        Printer::print_node(&arena, export),
        "export { ɵ0, y as ɵ1 };"
    );
}
