//! The fixed template set and the context that fills it in.
//!
//! Templates are compile-time strings with `{{VARIABLE}}` placeholders. A
//! [`RenderContext`] is built from exactly one [`ModuleName`], so every
//! substitution site in every file sees the same derived forms.
//!
//! | Variable       | Example        |
//! |----------------|----------------|
//! | `MODULE_NAME`  | `userProfile`  |
//! | `KEBAB_NAME`   | `user-profile` |
//! | `CAMEL_NAME`   | `userProfile`  |
//! | `CLASS_NAME`   | `UserProfile`  |

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::domain::{layout::TemplateVariant, naming::ModuleName};

/// Variable substitution context for one module.
#[derive(Debug, Clone)]
pub struct RenderContext {
    variables: HashMap<&'static str, String>,
}

impl RenderContext {
    pub fn new(name: &ModuleName) -> Self {
        let mut variables = HashMap::new();
        variables.insert("MODULE_NAME", name.raw().to_string());
        variables.insert("KEBAB_NAME", name.kebab().to_string());
        variables.insert("CAMEL_NAME", name.camel().to_string());
        variables.insert("CLASS_NAME", name.pascal().to_string());
        Self { variables }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.variables.get(key).map(String::as_str)
    }

    /// Replace every `{{KEY}}` placeholder with its value.
    ///
    /// Unknown placeholders are left as-is.
    pub fn render(&self, template: &str) -> String {
        let mut result = template.to_string();
        for (key, value) in &self.variables {
            let placeholder = format!("{{{{{key}}}}}");
            result = result.replace(&placeholder, value);
        }
        result
    }
}

/// One templated source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Artifact {
    Entity,
    CreateDto,
    UpdateDto,
    Repository,
    Service,
    Controller,
}

impl Artifact {
    /// Folder under the module directory.
    pub const fn folder(self) -> &'static str {
        match self {
            Self::Entity => "entities",
            Self::CreateDto | Self::UpdateDto => "dto",
            Self::Repository => "repositories",
            Self::Service => "services",
            Self::Controller => "controllers",
        }
    }

    pub fn file_name(self, name: &ModuleName) -> String {
        let kebab = name.kebab();
        match self {
            Self::Entity => format!("{kebab}.entity.ts"),
            Self::CreateDto => format!("create-{kebab}.dto.ts"),
            Self::UpdateDto => format!("update-{kebab}.dto.ts"),
            Self::Repository => format!("{kebab}.repository.ts"),
            Self::Service => format!("{kebab}.service.ts"),
            Self::Controller => format!("{kebab}.controller.ts"),
        }
    }

    /// Human label used in output.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::CreateDto => "create DTO",
            Self::UpdateDto => "update DTO",
            Self::Repository => "repository",
            Self::Service => "service",
            Self::Controller => "controller",
        }
    }

    /// Raw template text for this artifact.
    pub const fn source(self, variant: TemplateVariant) -> &'static str {
        match (self, variant) {
            (Self::Entity, _) => ENTITY,
            (Self::CreateDto, _) => CREATE_DTO,
            (Self::UpdateDto, _) => UPDATE_DTO,
            (Self::Repository, _) => REPOSITORY,
            (Self::Service, TemplateVariant::Repository) => SERVICE_WITH_REPOSITORY,
            (Self::Service, TemplateVariant::Classic) => SERVICE_CLASSIC,
            (Self::Controller, _) => CONTROLLER,
        }
    }

    pub fn render(self, variant: TemplateVariant, ctx: &RenderContext) -> String {
        ctx.render(self.source(variant))
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Template sources
// ============================================================================

const ENTITY: &str = r"import { Entity, PrimaryGeneratedColumn, Column } from 'typeorm';

@Entity()
export class {{CLASS_NAME}} {
  @PrimaryGeneratedColumn()
  id: number;

  @Column()
  name: string;
}
";

const CREATE_DTO: &str = r"import { ApiProperty } from '@nestjs/swagger';

export class Create{{CLASS_NAME}}Dto {
  @ApiProperty()
  name: string;
}
";

const UPDATE_DTO: &str = r"import { PartialType } from '@nestjs/mapped-types';
import { Create{{CLASS_NAME}}Dto } from './create-{{KEBAB_NAME}}.dto';

export class Update{{CLASS_NAME}}Dto extends PartialType(Create{{CLASS_NAME}}Dto) {}
";

const REPOSITORY: &str = r"import { Injectable } from '@nestjs/common';
import { InjectRepository } from '@nestjs/typeorm';
import { DeepPartial, Repository } from 'typeorm';
import { {{CLASS_NAME}} } from '../entities/{{KEBAB_NAME}}.entity';

@Injectable()
export class {{CLASS_NAME}}Repository {
  constructor(
    @InjectRepository({{CLASS_NAME}})
    private readonly repo: Repository<{{CLASS_NAME}}>,
  ) {}

  create(data: DeepPartial<{{CLASS_NAME}}>) {
    const entity = this.repo.create(data);
    return this.repo.save(entity);
  }

  findAll() {
    return this.repo.find();
  }

  findById(id: number) {
    return this.repo.findOneBy({ id });
  }

  update(id: number, data: Partial<{{CLASS_NAME}}>) {
    return this.repo.update(id, data);
  }

  delete(id: number) {
    return this.repo.delete(id);
  }
}
";

const SERVICE_WITH_REPOSITORY: &str = r"import { Injectable } from '@nestjs/common';
import { {{CLASS_NAME}}Repository } from '../repositories/{{KEBAB_NAME}}.repository';
import { Create{{CLASS_NAME}}Dto } from '../dto/create-{{KEBAB_NAME}}.dto';
import { Update{{CLASS_NAME}}Dto } from '../dto/update-{{KEBAB_NAME}}.dto';

@Injectable()
export class {{CLASS_NAME}}Service {
  constructor(private readonly {{CAMEL_NAME}}Repository: {{CLASS_NAME}}Repository) {}

  create(createDto: Create{{CLASS_NAME}}Dto) {
    return this.{{CAMEL_NAME}}Repository.create(createDto);
  }

  findAll() {
    return this.{{CAMEL_NAME}}Repository.findAll();
  }

  findOne(id: number) {
    return this.{{CAMEL_NAME}}Repository.findById(id);
  }

  update(id: number, updateDto: Update{{CLASS_NAME}}Dto) {
    return this.{{CAMEL_NAME}}Repository.update(id, updateDto);
  }

  remove(id: number) {
    return this.{{CAMEL_NAME}}Repository.delete(id);
  }
}
";

const SERVICE_CLASSIC: &str = r"import { Injectable } from '@nestjs/common';
import { Repository } from 'typeorm';
import { InjectRepository } from '@nestjs/typeorm';
import { {{CLASS_NAME}} } from '../entities/{{KEBAB_NAME}}.entity';
import { Create{{CLASS_NAME}}Dto } from '../dto/create-{{KEBAB_NAME}}.dto';
import { Update{{CLASS_NAME}}Dto } from '../dto/update-{{KEBAB_NAME}}.dto';

@Injectable()
export class {{CLASS_NAME}}Service {
  constructor(
    @InjectRepository({{CLASS_NAME}})
    private readonly repo: Repository<{{CLASS_NAME}}>,
  ) {}

  create(createDto: Create{{CLASS_NAME}}Dto) {
    const entity = this.repo.create(createDto);
    return this.repo.save(entity);
  }

  findAll() {
    return this.repo.find();
  }

  findOne(id: number) {
    return this.repo.findOneBy({ id });
  }

  update(id: number, updateDto: Update{{CLASS_NAME}}Dto) {
    return this.repo.update(id, updateDto);
  }

  remove(id: number) {
    return this.repo.delete(id);
  }
}
";

const CONTROLLER: &str = r"import { Controller, Get, Post, Body, Param, Patch, Delete } from '@nestjs/common';
import { ApiTags, ApiOperation, ApiResponse } from '@nestjs/swagger';
import { {{CLASS_NAME}}Service } from '../services/{{KEBAB_NAME}}.service';
import { Create{{CLASS_NAME}}Dto } from '../dto/create-{{KEBAB_NAME}}.dto';
import { Update{{CLASS_NAME}}Dto } from '../dto/update-{{KEBAB_NAME}}.dto';
import { {{CLASS_NAME}} } from '../entities/{{KEBAB_NAME}}.entity';

@ApiTags('{{CLASS_NAME}}')
@Controller('{{KEBAB_NAME}}')
export class {{CLASS_NAME}}Controller {
  constructor(private readonly service: {{CLASS_NAME}}Service) {}

  @Post()
  @ApiOperation({ summary: 'Create a new {{CLASS_NAME}}' })
  @ApiResponse({ status: 201, description: 'Entity created', type: {{CLASS_NAME}} })
  create(@Body() createDto: Create{{CLASS_NAME}}Dto) {
    return this.service.create(createDto);
  }

  @Get()
  @ApiOperation({ summary: 'List all {{CLASS_NAME}} entities' })
  @ApiResponse({ status: 200, description: 'Entity list', type: [{{CLASS_NAME}}] })
  findAll() {
    return this.service.findAll();
  }

  @Get(':id')
  @ApiOperation({ summary: 'Get a {{CLASS_NAME}} by id' })
  @ApiResponse({ status: 200, description: 'Entity found', type: {{CLASS_NAME}} })
  findOne(@Param('id') id: number) {
    return this.service.findOne(id);
  }

  @Patch(':id')
  @ApiOperation({ summary: 'Update a {{CLASS_NAME}} by id' })
  @ApiResponse({ status: 200, description: 'Entity updated', type: {{CLASS_NAME}} })
  update(@Param('id') id: number, @Body() updateDto: Update{{CLASS_NAME}}Dto) {
    return this.service.update(id, updateDto);
  }

  @Delete(':id')
  @ApiOperation({ summary: 'Delete a {{CLASS_NAME}} by id' })
  @ApiResponse({ status: 200, description: 'Entity deleted' })
  remove(@Param('id') id: number) {
    return this.service.remove(id);
  }
}
";
