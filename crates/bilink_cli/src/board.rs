//! Demo object graph: projects own tasks, tasks carry labels.

use bilink_core::{
    verify_registry, AssociationEndpoint, Field, Handle, OtherSide, Registry, SymmetryError,
    ToMany, ToOne,
};
use serde::Serialize;
use std::collections::{BTreeSet, HashSet};

pub type ProjectId = Handle<Project>;
pub type TaskId = Handle<Task>;
pub type LabelId = Handle<Label>;

#[derive(Default)]
pub struct Board {
    pub projects: Registry<Project>,
    pub tasks: Registry<Task>,
    pub labels: Registry<Label>,
}

pub struct Project {
    pub name: String,
    tasks: HashSet<TaskId>,
}

pub struct Task {
    pub title: String,
    project: Option<ProjectId>,
    labels: HashSet<LabelId>,
}

pub struct Label {
    pub name: String,
    tasks: HashSet<TaskId>,
}

impl Project {
    pub fn tasks(project: ProjectId) -> ToMany<Board, ProjectId, TaskId> {
        ToMany::new(
            Field::new(project_tasks, project_tasks_mut),
            project,
            Some(task_project_side()),
        )
    }
}

impl Task {
    pub fn project(task: TaskId) -> ToOne<Board, TaskId, ProjectId> {
        ToOne::new(
            Field::new(task_project, task_project_mut),
            task,
            Some(project_tasks_side()),
        )
    }

    pub fn labels(task: TaskId) -> ToMany<Board, TaskId, LabelId> {
        ToMany::new(
            Field::new(task_labels, task_labels_mut),
            task,
            Some(label_tasks_side()),
        )
    }
}

impl Label {
    pub fn tasks(label: LabelId) -> ToMany<Board, LabelId, TaskId> {
        ToMany::new(
            Field::new(label_tasks, label_tasks_mut),
            label,
            Some(task_labels_side()),
        )
    }
}

fn task_project_side() -> OtherSide<Board, ProjectId, TaskId> {
    OtherSide::new(|task| Box::new(Task::project(task)))
}

fn project_tasks_side() -> OtherSide<Board, TaskId, ProjectId> {
    OtherSide::new(|project| Box::new(Project::tasks(project)))
}

fn label_tasks_side() -> OtherSide<Board, TaskId, LabelId> {
    OtherSide::new(|label| Box::new(Label::tasks(label)))
}

fn task_labels_side() -> OtherSide<Board, LabelId, TaskId> {
    OtherSide::new(|task| Box::new(Task::labels(task)))
}

fn project_tasks(board: &Board, project: ProjectId) -> Option<&HashSet<TaskId>> {
    board.projects.get(project).map(|p| &p.tasks)
}

fn project_tasks_mut(board: &mut Board, project: ProjectId) -> Option<&mut HashSet<TaskId>> {
    board.projects.get_mut(project).map(|p| &mut p.tasks)
}

fn task_project(board: &Board, task: TaskId) -> Option<&Option<ProjectId>> {
    board.tasks.get(task).map(|t| &t.project)
}

fn task_project_mut(board: &mut Board, task: TaskId) -> Option<&mut Option<ProjectId>> {
    board.tasks.get_mut(task).map(|t| &mut t.project)
}

fn task_labels(board: &Board, task: TaskId) -> Option<&HashSet<LabelId>> {
    board.tasks.get(task).map(|t| &t.labels)
}

fn task_labels_mut(board: &mut Board, task: TaskId) -> Option<&mut HashSet<LabelId>> {
    board.tasks.get_mut(task).map(|t| &mut t.labels)
}

fn label_tasks(board: &Board, label: LabelId) -> Option<&HashSet<TaskId>> {
    board.labels.get(label).map(|l| &l.tasks)
}

fn label_tasks_mut(board: &mut Board, label: LabelId) -> Option<&mut HashSet<TaskId>> {
    board.labels.get_mut(label).map(|l| &mut l.tasks)
}

impl Board {
    pub fn add_project(&mut self, name: &str) -> ProjectId {
        self.projects.insert(Project {
            name: name.to_string(),
            tasks: HashSet::new(),
        })
    }

    pub fn add_task(&mut self, title: &str) -> TaskId {
        self.tasks.insert(Task {
            title: title.to_string(),
            project: None,
            labels: HashSet::new(),
        })
    }

    pub fn add_label(&mut self, name: &str) -> LabelId {
        self.labels.insert(Label {
            name: name.to_string(),
            tasks: HashSet::new(),
        })
    }

    /// Checks every relationship from both of its ends.
    pub fn verify(&self) -> Result<(), SymmetryError> {
        verify_registry(
            self,
            self.projects.handles(),
            |project| Box::new(Project::tasks(project)),
            &task_project_side(),
        )?;
        verify_registry(
            self,
            self.tasks.handles(),
            |task| Box::new(Task::project(task)),
            &project_tasks_side(),
        )?;
        verify_registry(
            self,
            self.tasks.handles(),
            |task| Box::new(Task::labels(task)),
            &label_tasks_side(),
        )?;
        verify_registry(
            self,
            self.labels.handles(),
            |label| Box::new(Label::tasks(label)),
            &task_labels_side(),
        )
    }

    /// Builds a name-based view with sorted members.
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            projects: self
                .projects
                .iter()
                .map(|(handle, project)| ProjectSnapshot {
                    id: handle,
                    name: project.name.clone(),
                    tasks: self.task_titles(Project::tasks(handle).get_all(self)),
                })
                .collect(),
            tasks: self
                .tasks
                .iter()
                .map(|(handle, task)| TaskSnapshot {
                    id: handle,
                    title: task.title.clone(),
                    project: Task::project(handle)
                        .get_one(self)
                        .and_then(|project| self.projects.get(project))
                        .map(|project| project.name.clone()),
                    labels: Task::labels(handle)
                        .get_all(self)
                        .into_iter()
                        .filter_map(|label| self.labels.get(label))
                        .map(|label| label.name.clone())
                        .collect(),
                })
                .collect(),
            labels: self
                .labels
                .iter()
                .map(|(handle, label)| LabelSnapshot {
                    id: handle,
                    name: label.name.clone(),
                    tasks: self.task_titles(Label::tasks(handle).get_all(self)),
                })
                .collect(),
        }
    }

    fn task_titles(&self, tasks: Vec<TaskId>) -> BTreeSet<String> {
        tasks
            .into_iter()
            .filter_map(|task| self.tasks.get(task))
            .map(|task| task.title.clone())
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct BoardSnapshot {
    pub projects: Vec<ProjectSnapshot>,
    pub tasks: Vec<TaskSnapshot>,
    pub labels: Vec<LabelSnapshot>,
}

#[derive(Debug, Serialize)]
pub struct ProjectSnapshot {
    pub id: ProjectId,
    pub name: String,
    pub tasks: BTreeSet<String>,
}

#[derive(Debug, Serialize)]
pub struct TaskSnapshot {
    pub id: TaskId,
    pub title: String,
    pub project: Option<String>,
    pub labels: BTreeSet<String>,
}

#[derive(Debug, Serialize)]
pub struct LabelSnapshot {
    pub id: LabelId,
    pub name: String,
    pub tasks: BTreeSet<String>,
}
