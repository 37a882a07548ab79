//! Sample plant ontology used by the `demo` command, tests and benchmarks

use crate::loader::Ontology;
use crate::model::{Concept, Role};
use crate::tbox::TBox;

/// `(Arbre AND (EXISTS produit Fruit))`
pub fn arbre_fruitier() -> Concept {
    Concept::and(vec![
        Concept::atomic("Arbre"),
        Concept::exists(Role::new("produit"), Concept::atomic("Fruit")),
    ])
}

/// `(NOT Fruit)`
pub fn non_fruit() -> Concept {
    Concept::not(Concept::atomic("Fruit"))
}

/// `(Plante OR Fleur)`
pub fn union_plante_fleur() -> Concept {
    Concept::or(vec![Concept::atomic("Plante"), Concept::atomic("Fleur")])
}

/// Plants, trees, flowers and fruit, built fresh on every call
pub fn plant_ontology() -> Ontology {
    let plante = Concept::atomic("Plante");
    let arbre = Concept::atomic("Arbre");
    let fruit = Concept::atomic("Fruit");
    let fleur = Concept::atomic("Fleur");
    let pomme = Concept::atomic("Pomme");
    let rose = Concept::atomic("Rose");
    let plante_herbacee = Concept::atomic("PlanteHerbacee");

    let mut tbox = TBox::new();
    tbox.add_axiom(arbre.clone(), plante.clone());
    tbox.add_axiom(fleur.clone(), plante.clone());
    tbox.add_axiom(fruit.clone(), plante.clone());
    tbox.add_axiom(pomme.clone(), fruit.clone());
    tbox.add_axiom(rose.clone(), fleur.clone());
    tbox.add_axiom(plante_herbacee.clone(), plante.clone());
    tbox.add_axiom(arbre_fruitier(), plante.clone());
    tbox.add_axiom(arbre_fruitier(), arbre.clone());

    Ontology {
        concepts: vec![
            plante,
            arbre,
            fruit,
            fleur,
            pomme,
            rose,
            plante_herbacee,
            arbre_fruitier(),
            non_fruit(),
            union_plante_fleur(),
        ],
        tbox,
    }
}

/// Linear hierarchy `C{n-1} ⊑ ... ⊑ C1 ⊑ C0`
pub fn chain_ontology(size: usize) -> Ontology {
    let mut tbox = TBox::new();
    let concepts: Vec<Concept> = (0..size).map(|i| Concept::atomic(format!("C{}", i))).collect();

    for i in 1..size {
        tbox.add_axiom(concepts[i].clone(), concepts[i - 1].clone());
    }

    Ontology { concepts, tbox }
}
